use serde::{Deserialize, Serialize};

/// One page of a paginated list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
    pub size: u32,
    #[serde(rename = "totalElements")]
    pub total_elements: u64,
    #[serde(rename = "totalPages")]
    pub total_pages: u32,
    /// Zero-based page index
    pub number: u32,
}

/// Page metadata without the items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct PageMeta {
    pub size: u32,
    #[serde(rename = "totalElements")]
    pub total_elements: u64,
    #[serde(rename = "totalPages")]
    pub total_pages: u32,
    pub number: u32,
}

impl<T> Page<T> {
    pub fn meta(&self) -> PageMeta {
        PageMeta {
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            number: self.number,
        }
    }

    pub fn into_parts(self) -> (Vec<T>, PageMeta) {
        let meta = self.meta();
        (self.content, meta)
    }
}

impl PageMeta {
    pub fn has_next(&self) -> bool {
        self.number.saturating_add(1) < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.number > 0
    }

    /// "page 2 of 5" style label, one-based.
    pub fn display(&self) -> String {
        format!("page {} of {}", u64::from(self.number) + 1, self.total_pages.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_page() {
        let json = r#"{"content":[1,2],"size":2,"totalElements":5,"totalPages":3,"number":0,"sort":{"sorted":true}}"#;
        let page: Page<i32> = serde_json::from_str(json).unwrap();
        let (items, meta) = page.into_parts();
        assert_eq!(items, vec![1, 2]);
        assert!(meta.has_next());
        assert!(!meta.has_previous());
        assert_eq!(meta.display(), "page 1 of 3");
    }

    #[test]
    fn test_empty_page_display() {
        let meta = PageMeta::default();
        assert!(!meta.has_next());
        assert_eq!(meta.display(), "page 1 of 1");
    }

    #[test]
    fn test_last_possible_page_number() {
        let meta = PageMeta {
            size: 5,
            total_elements: 10,
            total_pages: u32::MAX,
            number: u32::MAX,
        };
        assert!(!meta.has_next());
        assert!(meta.has_previous());
        assert_eq!(meta.display(), format!("page {} of {}", u64::from(u32::MAX) + 1, u32::MAX));
    }
}
