// src/exec/remote_loop.rs

use std::time::Duration;

/// Shell command that runs `script` forever on the remote side, pausing
/// between runs. A failing run does not end the loop; only the connection
/// going away does.
pub fn remote_loop_command(script: &str, pause: Duration) -> String {
    format!(
        "sh -c 'while true ; do {} ; sleep {} ; done'",
        escape_single_quoted(script),
        pause_arg(pause)
    )
}

/// Make `s` safe inside a single-quoted shell word.
fn escape_single_quoted(s: &str) -> String {
    s.replace('\'', r"'\''")
}

fn pause_arg(pause: Duration) -> String {
    if pause.subsec_millis() == 0 {
        pause.as_secs().to_string()
    } else {
        format!("{:.3}", pause.as_secs_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_script_in_sleep_loop() {
        assert_eq!(
            remote_loop_command("hostname ; uptime", Duration::from_secs(5)),
            "sh -c 'while true ; do hostname ; uptime ; sleep 5 ; done'"
        );
    }

    #[test]
    fn single_quotes_survive() {
        let cmd = remote_loop_command("echo 'hi'", Duration::from_secs(1));
        assert_eq!(cmd, r"sh -c 'while true ; do echo '\''hi'\'' ; sleep 1 ; done'");
    }

    #[test]
    fn fractional_pause() {
        let cmd = remote_loop_command("true", Duration::from_millis(1500));
        assert!(cmd.ends_with("sleep 1.500 ; done'"));
    }
}
