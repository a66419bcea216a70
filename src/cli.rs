//! `lwcp-decode` entry point
//!
//! Reads a capture, decodes each line and writes one JSON document per
//! message to stdout. Diagnostics go to the log on stderr.

use anyhow::{Context, Result};
use std::io::{self, Read, Write};
use std::path::Path;

use crate::Config;
use crate::decoder::{DecodeOptions, DecodeReport, Severity, decode_document};

/// Run the decoder with arguments from the command line
pub fn run() -> Result<()> {
    let config = Config::from_args_and_env()?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_level.as_str()),
    )
    .init();

    let options = DecodeOptions {
        convert: config.convert,
        overrides: config.load_overrides()?,
    };

    let content = read_input(config.input.as_deref())?;
    let report = decode_document(&content, &options);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_messages(&mut out, &report, config.pretty)?;
    out.flush()?;

    for diagnostic in &report.diagnostics {
        if diagnostic.severity == Severity::Warning {
            log::info!("line {}: {}", diagnostic.line, diagnostic.message);
        }
    }

    if config.strict && !report.is_clean() {
        anyhow::bail!(
            "{} line(s) had a malformed property list",
            report.error_count()
        );
    }

    Ok(())
}

/// Read the whole input file, or stdin when `path` is `None`
pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input: {}", path.display())),
        None => {
            let mut content = String::new();
            io::stdin()
                .read_to_string(&mut content)
                .context("Failed to read stdin")?;
            Ok(content)
        }
    }
}

/// Write every decoded message as JSON, one per line unless `pretty`
pub fn write_messages<W: Write>(out: &mut W, report: &DecodeReport, pretty: bool) -> Result<()> {
    for decoded in &report.messages {
        if pretty {
            serde_json::to_writer_pretty(&mut *out, &decoded.message)?;
        } else {
            serde_json::to_writer(&mut *out, &decoded.message)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_messages_as_json_lines() {
        let report = decode_document(
            "indi studio id=1\nbogus\nget studio.line#2\n",
            &DecodeOptions::default(),
        );

        let mut buf = Vec::new();
        write_messages(&mut buf, &report, false).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            r#"{"operation":"indi","object":"studio","subObject":null,"subObjectId":null,"properties":{"id":1}}"#
        );
        assert_eq!(
            lines[1],
            r#"{"operation":"get","object":"studio","subObject":"line","subObjectId":"2","properties":null}"#
        );
    }

    #[test]
    fn test_read_input_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("capture.txt");
        std::fs::write(&path, "indi studio mute\n").unwrap();

        assert_eq!(read_input(Some(&path)).unwrap(), "indi studio mute\n");
        assert!(read_input(Some(&dir.path().join("missing.txt"))).is_err());
    }
}
