#![forbid(unsafe_code)]

use crate::jsonrpc::parse_request;
use crate::session::Session;
use serde_json::Value;
use std::io::{BufRead, Write};
use tracing::{debug, info};

const MAX_CONTENT_LENGTH_BYTES: usize = 16 * 1024 * 1024;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Framing {
    NewlineJson,
    ContentLength,
}

impl Framing {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::NewlineJson => "newline_json",
            Self::ContentLength => "content_length",
        }
    }
}

pub(crate) fn detect_framing(line: &str) -> Option<Framing> {
    let trimmed = line.trim_start();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return Some(Framing::NewlineJson);
    }
    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with("content-length:") || lower.starts_with("content-type:") {
        return Some(Framing::ContentLength);
    }
    None
}

fn parse_content_length_header(line: &str) -> Option<usize> {
    let (key, value) = line.trim().split_once(':')?;
    if !key.trim().eq_ignore_ascii_case("content-length") {
        return None;
    }
    value.trim().parse::<usize>().ok()
}

/// Reads the rest of a header block starting at `first_header`, then the body.
///
/// `Ok(None)` means the peer closed the stream mid-frame.
fn read_content_length_frame<R: BufRead>(
    reader: &mut R,
    mut header: String,
) -> std::io::Result<Option<Vec<u8>>> {
    let mut content_length = parse_content_length_header(&header);
    while !header.trim_end().is_empty() {
        header.clear();
        if reader.read_line(&mut header)? == 0 {
            return Ok(None);
        }
        if content_length.is_none() {
            content_length = parse_content_length_header(&header);
        }
    }

    let Some(len) = content_length else {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            "Missing Content-Length header",
        ));
    };
    if len > MAX_CONTENT_LENGTH_BYTES {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            "Content-Length exceeds max allowed size",
        ));
    }

    let mut body = vec![0u8; len];
    reader.read_exact(&mut body)?;
    Ok(Some(body))
}

fn write_frame<W: Write>(
    writer: &mut W,
    framing: Framing,
    resp: &Value,
) -> Result<(), Box<dyn std::error::Error>> {
    match framing {
        Framing::NewlineJson => {
            writeln!(writer, "{}", serde_json::to_string(resp)?)?;
        }
        Framing::ContentLength => {
            let body = serde_json::to_vec(resp)?;
            write!(writer, "Content-Length: {}\r\n\r\n", body.len())?;
            writer.write_all(&body)?;
        }
    }
    writer.flush()?;
    Ok(())
}

fn answer<W: Write>(
    session: &mut Session,
    writer: &mut W,
    framing: Framing,
    body: &[u8],
) -> Result<(), Box<dyn std::error::Error>> {
    let resp = match parse_request(body) {
        Ok(request) => session.handle(request),
        Err(resp) => {
            debug!("malformed request");
            Some(resp)
        }
    };
    if let Some(resp) = resp {
        write_frame(writer, framing, &resp)?;
    }
    Ok(())
}

/// Serves requests until the reader reaches end of input.
///
/// Framing is fixed by the first non-blank line and never changes afterwards.
pub(crate) fn serve<R: BufRead, W: Write>(
    session: &mut Session,
    reader: &mut R,
    writer: &mut W,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut framing: Option<Framing> = None;
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }
        let mode = match framing {
            Some(mode) => mode,
            None => {
                let Some(detected) = detect_framing(&line) else {
                    debug!("skipping unrecognized line before framing");
                    continue;
                };
                info!(framing = detected.as_str(), "framing detected");
                session.log_mut().note_framing(detected.as_str());
                framing = Some(detected);
                detected
            }
        };
        match mode {
            Framing::NewlineJson => answer(session, writer, mode, line.trim().as_bytes())?,
            Framing::ContentLength => {
                let Some(body) = read_content_length_frame(reader, line)? else {
                    break;
                };
                answer(session, writer, mode, &body)?;
            }
        }
    }
    Ok(())
}

pub(crate) fn run_stdio(session: &mut Session) -> Result<(), Box<dyn std::error::Error>> {
    let stdin = std::io::stdin();
    let mut reader = stdin.lock();
    let mut stdout = std::io::stdout().lock();
    serve(session, &mut reader, &mut stdout)
}
