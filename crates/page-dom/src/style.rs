/// Inline `style` declarations in insertion order.
#[derive(Clone, Debug, Default)]
pub(crate) struct InlineStyle {
    decls: Vec<(String, String)>,
}

impl InlineStyle {
    pub(crate) fn parse(raw: &str) -> Self {
        let decls = raw
            .split(';')
            .filter_map(|decl| {
                let (prop, value) = decl.split_once(':')?;
                let prop = prop.trim().to_ascii_lowercase();
                let value = value.trim();
                if prop.is_empty() || value.is_empty() {
                    return None;
                }
                Some((prop, value.to_string()))
            })
            .collect();
        Self { decls }
    }

    pub(crate) fn get(&self, prop: &str) -> Option<&str> {
        let prop = prop.to_ascii_lowercase();
        self.decls
            .iter()
            .find(|(name, _)| *name == prop)
            .map(|(_, value)| value.as_str())
    }

    pub(crate) fn set(&mut self, prop: &str, value: &str) {
        let prop = prop.to_ascii_lowercase();
        let value = value.trim();
        if value.is_empty() {
            self.decls.retain(|(name, _)| *name != prop);
            return;
        }
        match self.decls.iter_mut().find(|(name, _)| *name == prop) {
            Some(slot) => slot.1 = value.to_string(),
            None => self.decls.push((prop, value.to_string())),
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    pub(crate) fn render(&self) -> String {
        self.decls
            .iter()
            .map(|(prop, value)| format!("{prop}: {value};"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_set_and_clear() {
        let mut style = InlineStyle::parse("color: red; Border-Color : blue;;");
        assert_eq!(style.get("border-color"), Some("blue"));
        style.set("color", "");
        style.set("background-color", "#f0fdf4");
        assert_eq!(style.render(), "border-color: blue; background-color: #f0fdf4;");
        style.set("border-color", "");
        style.set("background-color", "");
        assert!(style.is_empty());
    }
}
