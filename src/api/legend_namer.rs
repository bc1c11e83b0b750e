use std::sync::LazyLock;

use regex::Regex;

use crate::core::LabelSet;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{([^}]+)\}").expect("valid placeholder regex")
});

/// Legend text for one label set.
///
/// Without a template the compact JSON of the label set is returned. With a
/// template every `{key}` placeholder whose key has a non-empty value is
/// substituted in discovery order; other placeholders stay literal. Substituted
/// values are never rescanned.
#[must_use]
pub fn legend_name(labels: &LabelSet, template: Option<&str>) -> String {
    let Some(template) = template.filter(|template| !template.is_empty()) else {
        return labels.to_json();
    };

    let mut out = String::with_capacity(template.len());
    let mut cursor = 0;
    for captures in PLACEHOLDER.captures_iter(template) {
        let (Some(whole), Some(key)) = (captures.get(0), captures.get(1)) else {
            continue;
        };
        out.push_str(&template[cursor..whole.start()]);
        match labels.get(key.as_str()).filter(|value| !value.is_empty()) {
            Some(value) => out.push_str(value),
            None => out.push_str(whole.as_str()),
        }
        cursor = whole.end();
    }
    out.push_str(&template[cursor..]);
    out
}

#[cfg(test)]
mod tests {
    use super::legend_name;
    use crate::core::LabelSet;

    fn labels() -> LabelSet {
        [("host", "db-1"), ("job", "node"), ("empty", "")]
            .into_iter()
            .collect()
    }

    #[test]
    fn missing_template_serializes_labels() {
        assert_eq!(legend_name(&labels(), None), r#"{"host":"db-1","job":"node","empty":""}"#);
        assert_eq!(legend_name(&labels(), Some("")), legend_name(&labels(), None));
    }

    #[test]
    fn substitutes_present_keys_and_keeps_unknown_placeholders() {
        assert_eq!(
            legend_name(&labels(), Some("{job} on {host} ({zone})")),
            "node on db-1 ({zone})"
        );
    }

    #[test]
    fn empty_values_leave_placeholder_literal() {
        assert_eq!(legend_name(&labels(), Some("x{empty}y")), "x{empty}y");
    }

    #[test]
    fn substituted_values_are_not_rescanned() {
        let labels: LabelSet = [("a", "{b}"), ("b", "B")].into_iter().collect();
        assert_eq!(legend_name(&labels, Some("{a}-{b}")), "{b}-B");
    }

    #[test]
    fn repeated_placeholders_each_substitute() {
        assert_eq!(legend_name(&labels(), Some("{host}/{host}")), "db-1/db-1");
    }
}
