use crate::recording::RendererCall;
use anyhow::Result;
use similar::{ChangeTag, TextDiff};

/// Visible text of raw terminal output, escape sequences removed
pub fn visible_text(bytes: &[u8]) -> String {
    let stripped = strip_ansi_escapes::strip(bytes);
    String::from_utf8_lossy(&stripped).into_owned()
}

/// Compares renderer call logs and terminal output, failing with a readable diff
pub struct CallLogComparator;

impl Default for CallLogComparator {
    fn default() -> Self {
        Self::new()
    }
}

impl CallLogComparator {
    pub fn new() -> Self {
        Self
    }

    pub fn compare_calls(&self, expected: &[RendererCall], actual: &[RendererCall]) -> Result<()> {
        if expected == actual {
            return Ok(());
        }

        let expected_log = render_log(expected);
        let actual_log = render_log(actual);
        anyhow::bail!(
            "Renderer call mismatch:\n\nExpected:\n{}\n\nActual:\n{}\n\nDiff:\n{}",
            expected_log,
            actual_log,
            diff(&expected_log, &actual_log)
        )
    }

    /// Check that `expected` appears in `actual` in order, other calls allowed in between
    pub fn assert_subsequence(
        &self,
        expected: &[RendererCall],
        actual: &[RendererCall],
    ) -> Result<()> {
        let mut remaining = actual.iter();
        for call in expected {
            if !remaining.any(|candidate| candidate == call) {
                anyhow::bail!(
                    "Call {} not found in order in:\n{}",
                    call,
                    render_log(actual)
                );
            }
        }
        Ok(())
    }

    /// Compare terminal output by its visible text, ignoring trailing whitespace
    pub fn compare_output(&self, expected: &str, actual: &[u8]) -> Result<()> {
        let expected_clean = self.normalize_output(expected.as_bytes());
        let actual_clean = self.normalize_output(actual);

        if expected_clean == actual_clean {
            return Ok(());
        }

        anyhow::bail!(
            "Terminal output mismatch:\n\nExpected:\n{}\n\nActual:\n{}\n\nDiff:\n{}",
            expected_clean,
            actual_clean,
            diff(&expected_clean, &actual_clean)
        )
    }

    fn normalize_output(&self, output: &[u8]) -> String {
        visible_text(output)
            .lines()
            .map(str::trim_end)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn render_log(calls: &[RendererCall]) -> String {
    calls
        .iter()
        .map(|call| format!("{call}\n"))
        .collect()
}

fn diff(expected: &str, actual: &str) -> String {
    let diff = TextDiff::from_lines(expected, actual);
    let mut diff_output = String::new();

    for change in diff.iter_all_changes() {
        let sign = match change.tag() {
            ChangeTag::Delete => "-",
            ChangeTag::Insert => "+",
            ChangeTag::Equal => " ",
        };
        diff_output.push_str(&format!("{sign}{change}"));
    }
    diff_output
}
