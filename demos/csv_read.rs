//! CSV Reader Examples
//!
//! Demonstrates:
//! - Reading with headers and accessing fields by name or index
//! - Ragged rows and blank lines
//! - Dialect auto-detection
//! - Streaming a file without loading it into memory
//!
//! Run with `cargo run --example csv_read [path/to/file.csv]`

use csvstream::ParserConfig;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    println!("=== CSV Reader Examples ===\n");

    // Example 1: Headers, name and index access
    println!("1. Reading with headers...");
    {
        let data = "Letter,Word,Number\na,paris,5\n\nh,drink,60\n";
        for record in csvstream::parse(data) {
            let record = record?;
            println!(
                "   line {}: Letter={:?} [0]={:?} Number={:?}",
                record.line_number(),
                record.get("Letter"),
                record.get(0),
                record.get("Number")
            );
        }
    }

    // Example 2: Ragged rows
    println!("\n2. Short and long rows...");
    {
        let data = "h1,h2,h3\nv1,v2\nv1,v2,v3,extra\n";
        for record in csvstream::parse(data) {
            let record = record?;
            println!(
                "   h3={:?} [3]={:?} map={:?}",
                record.get("h3"),
                record.get(3),
                record.to_map()
            );
        }
    }

    // Example 3: Auto-detected dialect
    println!("\n3. Auto-detecting the dialect...");
    {
        let data = "# export\nid;desc\n1;\"semi;colon\"\n2;plain\n";
        let mut records = ParserConfig::new()
            .auto_detect(true)
            .skip_lines(1)
            .parse(data);

        let dialect = records.dialect()?;
        println!("   Separator: {:?}, quote: {:?}", dialect.separator, dialect.quote_char);
        for record in records {
            println!("   {:?}", record?.get("desc"));
        }
    }

    // Example 4: Stream a file given on the command line
    if let Some(path) = std::env::args().nth(1) {
        println!("\n4. Streaming {}...", path);
        let mut records = ParserConfig::new().auto_detect(true).open(&path)?;

        if let Some(header) = records.headers()? {
            println!("   Headers: {:?}", header.names());
        }

        let mut count = 0u64;
        for record in records.by_ref() {
            let record = record?;
            if count < 5 {
                println!("   {:?}", record.fields());
            }
            count += 1;
        }
        println!("   Total records: {}", count);
    }

    Ok(())
}
