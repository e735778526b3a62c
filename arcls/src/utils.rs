use std::fs::File;
use std::io::{BufRead, BufReader, Result as IoResult};
use std::path::Path;

use tracing::Level;

use crate::error::Result;

pub fn get_file_reader(filename: &Path) -> IoResult<BufReader<File>> {
    let file = File::open(filename)?;
    Ok(BufReader::new(file))
}

/// Reads one entry per line. `\r\n` endings and a leading byte order mark are
/// dropped; blank lines are kept as (malformed) entries.
pub fn read_listing<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut entries = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let line = line.strip_suffix('\r').unwrap_or(&line);
        let line = if entries.is_empty() {
            line.strip_prefix('\u{feff}').unwrap_or(line)
        } else {
            line
        };
        entries.push(line.to_string());
    }
    Ok(entries)
}

pub fn load_listing(path: &str) -> Result<Vec<String>> {
    if path == "-" {
        let stdin = std::io::stdin();
        return read_listing(stdin.lock());
    }
    read_listing(get_file_reader(Path::new(path))?)
}

pub fn initialize_logging_from_args(matches: &clap::ArgMatches) {
    let level = if matches.is_present("debug") {
        Level::DEBUG
    } else {
        Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}
