//! Element targeting: a selector string plus the method used to resolve it.
//!
//! Callers name elements by id, name attribute, CSS selector, or XPath. The
//! scripted flows additionally build prioritized candidate lists that are
//! tried in order with early exit.

use std::fmt;

/// How a target string is interpreted during lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocatorMethod {
    Id,
    Name,
    Css,
    Xpath,
}

impl LocatorMethod {
    /// Parse a request-supplied method tag. Unknown or absent tags fall back
    /// to CSS.
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some("id") => LocatorMethod::Id,
            Some("name") => LocatorMethod::Name,
            Some("xpath") => LocatorMethod::Xpath,
            _ => LocatorMethod::Css,
        }
    }
}

impl fmt::Display for LocatorMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            LocatorMethod::Id => "id",
            LocatorMethod::Name => "name",
            LocatorMethod::Css => "css",
            LocatorMethod::Xpath => "xpath",
        };
        f.write_str(tag)
    }
}

/// A target string and its resolution method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    pub method: LocatorMethod,
    pub target: String,
}

impl Locator {
    pub fn new(method: LocatorMethod, target: impl Into<String>) -> Self {
        Self {
            method,
            target: target.into(),
        }
    }

    pub fn css(target: impl Into<String>) -> Self {
        Self::new(LocatorMethod::Css, target)
    }

    pub fn xpath(target: impl Into<String>) -> Self {
        Self::new(LocatorMethod::Xpath, target)
    }

    /// Compile to a CSS selector, or `None` for XPath locators.
    ///
    /// Id and name targets become quoted attribute selectors so values with
    /// CSS metacharacters resolve literally.
    pub fn as_css(&self) -> Option<String> {
        match self.method {
            LocatorMethod::Id => Some(format!("[id={}]", css_string(&self.target))),
            LocatorMethod::Name => Some(format!("[name={}]", css_string(&self.target))),
            LocatorMethod::Css => Some(self.target.clone()),
            LocatorMethod::Xpath => None,
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.method, self.target)
    }
}

/// Quote a value as a CSS string literal.
fn css_string(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        if c == '"' || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_from_tag() {
        assert_eq!(LocatorMethod::from_tag(Some("id")), LocatorMethod::Id);
        assert_eq!(LocatorMethod::from_tag(Some("name")), LocatorMethod::Name);
        assert_eq!(LocatorMethod::from_tag(Some("xpath")), LocatorMethod::Xpath);
        assert_eq!(LocatorMethod::from_tag(Some("css")), LocatorMethod::Css);
        // unknown and absent tags default to CSS
        assert_eq!(LocatorMethod::from_tag(Some("cssx")), LocatorMethod::Css);
        assert_eq!(LocatorMethod::from_tag(None), LocatorMethod::Css);
    }

    #[test]
    fn test_id_compiles_to_attribute_selector() {
        let locator = Locator::new(LocatorMethod::Id, "username");
        assert_eq!(locator.as_css().unwrap(), r#"[id="username"]"#);
    }

    #[test]
    fn test_name_with_quotes_is_escaped() {
        let locator = Locator::new(LocatorMethod::Name, r#"user"name"#);
        assert_eq!(locator.as_css().unwrap(), r#"[name="user\"name"]"#);
    }

    #[test]
    fn test_css_passes_through() {
        let locator = Locator::css("#login > input");
        assert_eq!(locator.as_css().unwrap(), "#login > input");
    }

    #[test]
    fn test_xpath_has_no_css_form() {
        let locator = Locator::xpath("//button[@type='submit']");
        assert!(locator.as_css().is_none());
    }

    #[test]
    fn test_display() {
        let locator = Locator::new(LocatorMethod::Id, "user");
        assert_eq!(locator.to_string(), "id=user");
    }
}
