use std::io::{Read, Write};
use std::process::{Command, ExitStatus, Output, Stdio};

use anyhow::Result;
use log::debug;
use zeroize::Zeroize;

use super::RunnerErr;

/// Runs `executable` to completion. When `stdin_secret` is given it is written
/// to the child's stdin followed by a newline and the buffer is wiped.
pub(crate) fn run_gpg_child(
    executable: &str,
    args: &[&str],
    stdin_secret: Option<&str>,
) -> Result<Output> {
    let mut child = Command::new(executable)
        .args(args)
        .stdin(if stdin_secret.is_some() { Stdio::piped() } else { Stdio::null() })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    if let Some(secret) = stdin_secret {
        let mut buffer = Vec::with_capacity(secret.len() + 1);
        buffer.extend_from_slice(secret.as_bytes());
        buffer.push(b'\n');
        let written: Result<()> = match child.stdin.take() {
            Some(mut input) => {
                input.write_all(&buffer).and_then(|_| input.flush()).map_err(Into::into)
            }
            None => Err(RunnerErr::CannotTakeStdin.into()),
        };
        buffer.zeroize();
        if let Err(e) = written {
            let _ = child.kill();
            let _ = child.wait();
            return Err(e);
        }
    }

    Ok(child.wait_with_output()?)
}

pub(crate) fn check_exit(output: &Output) -> Result<()> {
    if output.status.success() {
        Ok(())
    } else {
        let err_msg = String::from_utf8_lossy(&output.stderr);
        Err(RunnerErr::ExitFailure(format!("code: {:?}\n{}", output.status.code(), err_msg.trim()))
            .into())
    }
}

/// Runs `executable` with stdout and stderr merged into one pipe.
pub(crate) fn run_gpg_combined(executable: &str, args: &[&str]) -> Result<(ExitStatus, String)> {
    let (mut reader, writer) = os_pipe::pipe()?;
    let writer_clone = writer.try_clone()?;
    let mut cmd = Command::new(executable);
    cmd.args(args).stdin(Stdio::null()).stdout(writer).stderr(writer_clone);
    let mut child = cmd.spawn()?;
    // the command holds the write ends; they must be gone before reading to EOF
    drop(cmd);

    let mut buf = Vec::new();
    reader.read_to_end(&mut buf)?;
    let status = child.wait()?;
    Ok((status, String::from_utf8_lossy(&buf).into_owned()))
}

/// `gpg (GnuPG) 2.4.4` -> `2.4.4`
///
/// Diagnostics such as `gpg: WARNING: unsafe permissions on homedir` share the
/// stream and may come first; they are skipped.
pub(crate) fn version_from_output(output: &str) -> String {
    output
        .lines()
        .find(|line| {
            line.split_whitespace().next().is_some_and(|first| !first.ends_with(':'))
        })
        .and_then(|line| line.split_whitespace().last())
        .unwrap_or_default()
        .to_string()
}

/// Fingerprints of primary keys in a `--with-colons` listing; `primary` is the
/// record type of the primary key (`pub` or `sec`). Subkey fingerprints are
/// skipped.
pub(crate) fn parse_primary_fingerprints(listing: &str, primary: &str) -> Vec<String> {
    let mut fingerprints = Vec::new();
    let mut want_fpr = false;
    for line in listing.lines() {
        let record = line.split(':').next().unwrap_or_default();
        if record == primary {
            want_fpr = true;
        } else if record == "sub" || record == "ssb" {
            want_fpr = false;
        } else if record == "fpr" && want_fpr {
            if let Some(fpr) = line.split(':').nth(9).filter(|f| !f.is_empty()) {
                fingerprints.push(fpr.to_string());
            }
            want_fpr = false;
        }
    }
    debug!("Parsed fingerprints: {:?}", fingerprints);
    fingerprints
}

/// Recipient ids from the `uid` records of a `--with-colons` listing: the
/// e-mail address when the user id has one, otherwise the whole user id.
pub(crate) fn parse_uid_recipients(listing: &str) -> Vec<String> {
    let mut recipients = Vec::new();
    for line in listing.lines().filter(|l| l.starts_with("uid:")) {
        let Some(user_id) = line.split(':').nth(9) else {
            continue;
        };
        let user_id = unescape_colons(user_id);
        let recipient = match user_id.split_once('<').and_then(|(_, rest)| rest.split_once('>')) {
            Some((email, _)) if !email.is_empty() => email.to_string(),
            _ => user_id.trim().to_string(),
        };
        if !recipient.is_empty() {
            recipients.push(recipient);
        }
    }
    debug!("Parsed recipients: {:?}", recipients);
    recipients
}

// gpg escapes ':' and a few other bytes as `\xHH` inside colon listings
fn unescape_colons(field: &str) -> String {
    let mut res = String::with_capacity(field.len());
    let mut rest = field;
    while let Some(pos) = rest.find("\\x") {
        res.push_str(&rest[..pos]);
        let hex = rest.get(pos + 2..pos + 4);
        match hex.and_then(|h| u8::from_str_radix(h, 16).ok()) {
            Some(b) if b.is_ascii() => {
                res.push(b as char);
                rest = &rest[pos + 4..];
            }
            _ => {
                res.push_str("\\x");
                rest = &rest[pos + 2..];
            }
        }
    }
    res.push_str(rest);
    res
}
