use colored::Colorize;
use tyguard_compiler::CompileError;
use tyguard_runtime::ValidationError;

/// Human-readable status lines for the terminal.
pub struct Reporter {
    color: bool,
}

impl Reporter {
    pub const fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn passed(&self) -> String {
        if self.color {
            "ok".green().bold().to_string()
        } else {
            "ok".to_string()
        }
    }

    pub fn validation_failure(&self, error: &ValidationError) -> String {
        format!("{}: {}", self.category("error"), error.message)
    }

    pub fn compile_failure(&self, error: &CompileError) -> String {
        let code = if self.color {
            format!("[{}]", error.code()).dimmed().to_string()
        } else {
            format!("[{}]", error.code())
        };
        format!("{} {code}: {error}", self.category("error"))
    }

    /// `canonical name  ->  identifier` rows, names padded to one column.
    pub fn names(&self, rows: &[(String, String)]) -> String {
        let width = rows.iter().map(|(name, _)| name.chars().count()).max().unwrap_or(0);
        let mut out = String::new();
        for (name, identifier) in rows {
            let padding = " ".repeat(width - name.chars().count());
            let identifier = if self.color {
                identifier.cyan().to_string()
            } else {
                identifier.clone()
            };
            out.push_str(&format!("{name}{padding}  {identifier}\n"));
        }
        out
    }

    fn category(&self, text: &str) -> String {
        if self.color {
            text.red().bold().to_string()
        } else {
            text.to_string()
        }
    }
}

#[cfg(test)]
#[path = "../tests/reporter_tests.rs"]
mod tests;
