//! # Folio CLI
//!
//! Usage:
//!   folio input.json -o layout.json
//!   echo '{ ... }' | folio --compact
//!   folio --cv resume.json
//!   folio --example > document.json
//!
//! Set `RUST_LOG=folio=debug` to trace page breaks and fallbacks.

use std::env;
use std::fs;
use std::io::{self, Read};
use std::process;

fn main() {
    env_logger::init();
    let args: Vec<String> = env::args().collect();

    if args.iter().any(|a| a == "--example") {
        print!("{}", example_document_json());
        return;
    }

    let input = match read_input(&args) {
        Ok(input) => input,
        Err(e) => fail(&format!("Failed to read input: {}", e)),
    };

    let result = if args.iter().any(|a| a == "--cv") {
        folio::layout_cv_json(&input)
    } else {
        folio::layout_json(&input)
    };
    let pretty = !args.iter().any(|a| a == "--compact");
    let json = match result.and_then(|output| folio::output_to_json(&output, pretty)) {
        Ok(json) => json,
        Err(e) => fail(&format!("✗ {}", e)),
    };

    let output_path = args.windows(2).find(|w| w[0] == "-o").map(|w| w[1].clone());
    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(&path, &json) {
                fail(&format!("Failed to write {}: {}", path, e));
            }
            eprintln!("✓ Written {} bytes to {}", json.len(), path);
        }
        None => println!("{}", json),
    }
}

/// The first positional argument names the input file; without one, read stdin.
fn read_input(args: &[String]) -> io::Result<String> {
    let path = args
        .iter()
        .enumerate()
        .skip(1)
        .find(|(i, a)| !a.starts_with('-') && args[*i - 1] != "-o")
        .map(|(_, a)| a);
    match path {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn fail(message: &str) -> ! {
    eprintln!("{}", message);
    process::exit(1);
}

fn example_document_json() -> &'static str {
    r##"{
  "contentBlocks": [
    {
      "id": "title",
      "type": "heading",
      "content": "Quarterly Report",
      "styles": { "fontSize": 24, "fontWeight": "bold", "textAlign": "center", "color": "#1f2937" }
    },
    {
      "id": "intro",
      "type": "paragraph",
      "content": "Revenue grew 18% quarter over quarter, driven by the new enterprise tier and lower churn in the self-serve plans.",
      "styles": { "fontSize": 12, "lineHeight": 1.5 }
    },
    {
      "id": "note",
      "type": "container",
      "content": "All figures are unaudited and subject to revision.",
      "styles": { "fontSize": 11, "color": "#4b5563" }
    }
  ],
  "layout": { "pageSize": "A4", "orientation": "portrait", "columns": 1 },
  "styles": { "margin": 60 },
  "template": "business"
}
"##
}
