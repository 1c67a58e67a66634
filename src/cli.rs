use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Sync CSV contacts into the Hatchbuck.com CRM",
    long_about = "Sync CSV contacts into the Hatchbuck.com CRM.\n\n\
                  The first column holds the full name, the second a comma-separated list of \
                  email addresses. The API key is read from HATCHBUCK_APIKEY (environment or .env)."
)]
pub struct Cli {
    /// CSV file to import (`-` reads stdin); the first row is a header
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
    /// Hatchbuck tag applied to every imported contact
    #[arg(value_name = "TAG")]
    pub tag: String,
    /// Output verbose debug logging
    #[arg(short, long)]
    pub verbose: bool,
    /// Don't actually post, just log what would have been posted
    #[arg(short = 'n', long = "noop")]
    pub noop: bool,
    /// Keep processing later rows when a row fails instead of stopping
    #[arg(long = "keep-going")]
    pub keep_going: bool,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}

pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\t" => Ok(b'\t'),
        "comma" | "," => Ok(b','),
        "|" | "pipe" => Ok(b'|'),
        ";" | "semicolon" => Ok(b';'),
        other => {
            let mut chars = other.chars();
            let first = chars
                .next()
                .ok_or_else(|| "Delimiter cannot be empty".to_string())?;
            if chars.next().is_some() {
                return Err("Delimiter must be a single character".to_string());
            }
            if !first.is_ascii() {
                return Err("Delimiter must be ASCII".to_string());
            }
            Ok(first as u8)
        }
    }
}
