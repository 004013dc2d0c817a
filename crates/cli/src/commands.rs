//! `encrypt`, `decrypt`, and `fingerprint` subcommands.
//!
//! Each command takes its input as an argument or, when omitted, from the
//! supplied reader, and writes exactly one line to the supplied writer.

use std::io::{Read, Write};

use anyhow::{Context, Result};
use common::envelope::{decrypt_with_key, encrypt_with_key};
use common::SecretKey;

/// Encrypt `text` (or the contents of `input`) and write the token.
///
/// Input read from `input` loses one trailing line ending, so
/// `echo key | envelope encrypt` protects `key`, not `key\n`.
pub fn encrypt(
    key: &SecretKey,
    text: Option<&str>,
    input: impl Read,
    out: &mut impl Write,
) -> Result<()> {
    let plaintext = match text {
        Some(t) => t.to_owned(),
        None => {
            let mut raw = read_all(input)?;
            strip_line_ending(&mut raw);
            raw
        }
    };
    let token = encrypt_with_key(&plaintext, key).context("failed to encrypt")?;
    writeln!(out, "{token}").context("failed to write token")
}

/// Decrypt `token` (or the contents of `input`) and write the plaintext.
///
/// Surrounding whitespace is ignored; the token alphabet contains none.
pub fn decrypt(
    key: &SecretKey,
    token: Option<&str>,
    input: impl Read,
    out: &mut impl Write,
) -> Result<()> {
    let token = match token {
        Some(t) => t.trim().to_owned(),
        None => read_all(input)?.trim().to_owned(),
    };
    if token.is_empty() {
        anyhow::bail!("no token given; pass one as an argument or on stdin");
    }
    let plaintext = decrypt_with_key(&token, key).context("failed to decrypt token")?;
    writeln!(out, "{plaintext}").context("failed to write plaintext")
}

/// Write the fingerprint of `key`.
pub fn fingerprint(key: &SecretKey, out: &mut impl Write) -> Result<()> {
    writeln!(out, "{}", key.fingerprint()).context("failed to write fingerprint")
}

fn read_all(mut input: impl Read) -> Result<String> {
    let mut buf = String::new();
    input
        .read_to_string(&mut buf)
        .context("failed to read stdin as UTF-8")?;
    Ok(buf)
}

fn strip_line_ending(s: &mut String) {
    if s.ends_with('\n') {
        s.pop();
        if s.ends_with('\r') {
            s.pop();
        }
    }
}
