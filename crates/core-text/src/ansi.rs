//! ANSI escape sequence scanning.
//!
//! The measurement and wrap passes both need to recognize maximal escape
//! runs without interpreting most of them. Only two families carry state the
//! wrapper cares about (SGR styling, OSC 8 hyperlinks); everything else is
//! opaque zero-width bytes.
//!
//! Malformed sequences are deliberately not swallowed: a lone ESC or an
//! unterminated CSI/OSC parses as ordinary printable text so that broken
//! input degrades to visible garbage instead of silently eating the rest of
//! the line.

const ESC: u8 = 0x1b;
const BEL: u8 = 0x07;

/// Byte length of the escape sequence starting at `text[start..]`, or `None`
/// when the bytes at `start` do not form a complete, well-terminated escape.
///
/// Recognized forms:
/// * CSI: `ESC [ parameters… final` with final byte in `@`..=`~`.
/// * OSC: `ESC ] … BEL` or `ESC ] … ESC \`.
/// * Two-byte escapes: `ESC` followed by one byte in `@`..=`_` (excluding
///   the CSI/OSC introducers handled above).
pub fn escape_len(text: &str, start: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    if start >= bytes.len() || bytes[start] != ESC {
        return None;
    }
    let second = *bytes.get(start + 1)?;
    match second {
        b'[' => {
            // CSI: parameter/intermediate bytes 0x20..=0x3f, final 0x40..=0x7e.
            let mut i = start + 2;
            while i < bytes.len() {
                let b = bytes[i];
                if (0x40..=0x7e).contains(&b) {
                    return Some(i + 1 - start);
                }
                if !(0x20..=0x3f).contains(&b) {
                    return None;
                }
                i += 1;
            }
            None
        }
        b']' => {
            // OSC: terminated by BEL or ST (ESC \).
            let mut i = start + 2;
            while i < bytes.len() {
                match bytes[i] {
                    BEL => return Some(i + 1 - start),
                    ESC => {
                        return if bytes.get(i + 1) == Some(&b'\\') {
                            Some(i + 2 - start)
                        } else {
                            None
                        };
                    }
                    _ => i += 1,
                }
            }
            None
        }
        0x40..=0x5f => Some(2),
        _ => None,
    }
}

/// True when `seq` is a complete SGR sequence (`ESC [ … m`).
pub fn is_sgr(seq: &str) -> bool {
    seq.len() >= 3 && seq.starts_with("\x1b[") && seq.ends_with('m')
}

/// True when `seq` resets all SGR attributes (`ESC [ m`, `ESC [ 0 m` or any
/// parameter list beginning with `0;`).
pub fn is_sgr_reset(seq: &str) -> bool {
    if !is_sgr(seq) {
        return false;
    }
    let params = &seq[2..seq.len() - 1];
    params.is_empty() || params == "0" || params.starts_with("0;")
}

/// True when `seq` is an OSC 8 hyperlink sequence. Returns the sequence
/// classification: `Some(true)` opens a link, `Some(false)` closes one.
pub fn hyperlink_kind(seq: &str) -> Option<bool> {
    if !seq.starts_with("\x1b]8;") {
        return None;
    }
    let body = seq
        .strip_suffix('\x07')
        .or_else(|| seq.strip_suffix("\x1b\\"))?;
    // "ESC ] 8 ; params ; uri"; an empty uri closes the link.
    let uri = body.rsplit(';').next().unwrap_or("");
    Some(!uri.is_empty())
}

/// Remove every recognized escape sequence, keeping malformed ones literal.
pub fn strip_ansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    let bytes = text.as_bytes();
    while i < bytes.len() {
        if let Some(len) = escape_len(text, i) {
            i += len;
            continue;
        }
        let next = next_char_boundary(text, i);
        out.push_str(&text[i..next]);
        i = next;
    }
    out
}

pub(crate) fn next_char_boundary(text: &str, i: usize) -> usize {
    let mut j = i + 1;
    while j < text.len() && !text.is_char_boundary(j) {
        j += 1;
    }
    j
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csi_sgr_length() {
        let s = "\x1b[31mred";
        assert_eq!(escape_len(s, 0), Some(5));
    }

    #[test]
    fn osc_hyperlink_bel_terminated() {
        let s = "\x1b]8;;https://example.com\x07text";
        let len = escape_len(s, 0).unwrap();
        assert_eq!(&s[len..], "text");
        assert_eq!(hyperlink_kind(&s[..len]), Some(true));
    }

    #[test]
    fn osc_hyperlink_st_terminated_close() {
        let s = "\x1b]8;;\x1b\\";
        assert_eq!(escape_len(s, 0), Some(s.len()));
        assert_eq!(hyperlink_kind(s), Some(false));
    }

    #[test]
    fn unterminated_csi_is_not_an_escape() {
        assert_eq!(escape_len("\x1b[31", 0), None);
        assert_eq!(escape_len("\x1b", 0), None);
    }

    #[test]
    fn sgr_reset_detection() {
        assert!(is_sgr_reset("\x1b[0m"));
        assert!(is_sgr_reset("\x1b[m"));
        assert!(!is_sgr_reset("\x1b[31m"));
        assert!(!is_sgr_reset("\x1b[1;31m"));
    }

    #[test]
    fn strip_removes_only_complete_sequences() {
        assert_eq!(strip_ansi("\x1b[1mbold\x1b[0m"), "bold");
        // Malformed escape stays literal.
        assert_eq!(strip_ansi("a\x1b[3"), "a\x1b[3");
    }
}
