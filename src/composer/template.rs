// file: src/composer/template.rs
// description: placeholder substitution for response sentences
// reference: {name}-style placeholders

#[derive(Debug, Clone)]
pub struct ResponseTemplate {
    template: String,
}

impl ResponseTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// Fill `{key}` placeholders in a single pass over the template, so
    /// substituted values are never scanned again. Unknown keys stay as
    /// written.
    pub fn generate(&self, values: &[(&str, &str)]) -> String {
        let mut result = String::with_capacity(self.template.len());
        let mut rest = self.template.as_str();

        while let Some(open) = rest.find('{') {
            result.push_str(&rest[..open]);
            let after = &rest[open + 1..];

            let Some(close) = after.find('}') else {
                rest = &rest[open..];
                break;
            };

            let key = &after[..close];
            match values.iter().find(|(name, _)| *name == key) {
                Some((_, value)) => result.push_str(value),
                None => {
                    result.push('{');
                    result.push_str(key);
                    result.push('}');
                }
            }
            rest = &after[close + 1..];
        }

        result.push_str(rest);
        result.trim_end().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate() {
        let template = ResponseTemplate::new("NIP dari {dosen} itu adalah {nip}");
        let result = template.generate(&[("dosen", "Budi"), ("nip", "123")]);
        assert_eq!(result, "NIP dari Budi itu adalah 123");
    }

    #[test]
    fn test_generate_trims_empty_trailing_field() {
        let template = ResponseTemplate::new("{nama} periode {periode}. {keterangan}");
        let result = template.generate(&[("nama", "A"), ("periode", "2024–2029"), ("keterangan", "")]);
        assert_eq!(result, "A periode 2024–2029.");
    }

    #[test]
    fn test_values_are_not_substituted_again() {
        let template = ResponseTemplate::new("NIP dari {dosen} itu adalah {nip}");
        let result = template.generate(&[("dosen", "Budi {nip}"), ("nip", "123")]);
        assert_eq!(result, "NIP dari Budi {nip} itu adalah 123");
    }

    #[test]
    fn test_unknown_and_unclosed_placeholders_kept() {
        let template = ResponseTemplate::new("{dosen} {unknown} {open");
        let result = template.generate(&[("dosen", "Sri")]);
        assert_eq!(result, "Sri {unknown} {open");
    }
}
