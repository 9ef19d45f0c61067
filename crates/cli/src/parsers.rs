use std::str::FromStr;

/// `--assoc` の値 (`<glob>=<language>`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssocArg {
    pub pattern: String,
    pub language: String,
}

impl FromStr for AssocArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // glob 側に `=` が含まれることがあるので最後の `=` で分ける
        let (pattern, language) = s
            .rsplit_once('=')
            .ok_or_else(|| format!("Expected <glob>=<language>: {s}"))?;
        let (pattern, language) = (pattern.trim(), language.trim());
        if pattern.is_empty() || language.is_empty() {
            return Err(format!("Expected <glob>=<language>: {s}"));
        }
        Ok(Self {
            pattern: pattern.to_string(),
            language: language.to_string(),
        })
    }
}

impl From<AssocArg> for (String, String) {
    fn from(arg: AssocArg) -> Self {
        (arg.pattern, arg.language)
    }
}
