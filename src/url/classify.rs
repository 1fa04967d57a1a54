//! Request path classification.
//!
//! A path is a single post, an archive listing or foreign to the blog.
//! The post pattern is tried first, then every archive pattern in order;
//! the first match wins.

use super::pattern::{CompiledPattern, Field};
use serde::Serialize;

/// A single post address, decoded from the post template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostRef {
    pub year: i32,
    pub month: u32,
    pub date: u32,
    pub title: String,
}

/// Which listing an archive path asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Root,
    Tag,
    Year,
    Month,
    Day,
}

/// Constraints of an archive listing.
///
/// Month is only meaningful with a year and a day only with a month,
/// so the variants nest instead of carrying independent options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "dimension", rename_all = "lowercase")]
pub enum ArchiveFilter {
    #[serde(rename = "root")]
    All,
    Tag {
        tag: String,
    },
    Year {
        year: i32,
    },
    Month {
        year: i32,
        month: u32,
    },
    Day {
        year: i32,
        month: u32,
        date: u32,
    },
}

impl ArchiveFilter {
    /// Build a filter from captured fields.
    ///
    /// Returns `None` for combinations with no defined meaning: a month
    /// without a year, a day without a month, a tag mixed with date fields,
    /// a title, or a date field that is not a number.
    pub fn from_fields(fields: &[(Field, &str)]) -> Option<Self> {
        let mut year = None;
        let mut month = None;
        let mut date = None;
        let mut tag = None;

        for &(field, value) in fields {
            match field {
                Field::Year => year = Some(value.parse::<i32>().ok()?),
                Field::Month => month = Some(value.parse::<u32>().ok()?),
                Field::Date => date = Some(value.parse::<u32>().ok()?),
                Field::Tag => tag = Some(value),
                Field::Title => return None,
            }
        }

        match (tag, year, month, date) {
            (None, None, None, None) => Some(Self::All),
            (Some(tag), None, None, None) => Some(Self::Tag {
                tag: tag.to_owned(),
            }),
            (None, Some(year), None, None) => Some(Self::Year { year }),
            (None, Some(year), Some(month), None) => Some(Self::Month { year, month }),
            (None, Some(year), Some(month), Some(date)) => Some(Self::Day { year, month, date }),
            _ => None,
        }
    }

    pub const fn dimension(&self) -> Dimension {
        match self {
            Self::All => Dimension::Root,
            Self::Tag { .. } => Dimension::Tag,
            Self::Year { .. } => Dimension::Year,
            Self::Month { .. } => Dimension::Month,
            Self::Day { .. } => Dimension::Day,
        }
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            Self::Tag { tag } => Some(tag.as_str()),
            _ => None,
        }
    }

    pub const fn year(&self) -> Option<i32> {
        match *self {
            Self::Year { year } | Self::Month { year, .. } | Self::Day { year, .. } => Some(year),
            _ => None,
        }
    }

    pub const fn month(&self) -> Option<u32> {
        match *self {
            Self::Month { month, .. } | Self::Day { month, .. } => Some(month),
            _ => None,
        }
    }

    pub const fn date(&self) -> Option<u32> {
        match *self {
            Self::Day { date, .. } => Some(date),
            _ => None,
        }
    }
}

/// Result of classifying a request path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Classification {
    Post(PostRef),
    Archive(ArchiveFilter),
    Unrecognized,
}

impl Classification {
    pub const fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized)
    }
}

/// Strip a trailing `/index` and trailing slashes from a request path.
///
/// `/2012/11/index` → `/2012/11`, `/archive/` → `/archive`, `/` stays `/`.
pub fn normalize_path(path: &str) -> &str {
    let path = path.strip_suffix("/index").unwrap_or(path);
    match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    }
}

/// Decode the captures of the post pattern.
pub(super) fn post_ref(pattern: &CompiledPattern, path: &str) -> Option<PostRef> {
    let mut year = None;
    let mut month = None;
    let mut date = None;
    let mut title = None;

    for (field, value) in pattern.captures(path)? {
        match field {
            Field::Year => year = value.parse().ok(),
            Field::Month => month = value.parse().ok(),
            Field::Date => date = value.parse().ok(),
            Field::Title => title = Some(value.to_owned()),
            Field::Tag => {}
        }
    }

    Some(PostRef {
        year: year?,
        month: month?,
        date: date?,
        title: title?,
    })
}

/// First archive pattern that matches the path with a well-formed filter.
pub(super) fn archive_filter(archives: &[CompiledPattern], path: &str) -> Option<ArchiveFilter> {
    archives.iter().find_map(|pattern| {
        pattern
            .captures(path)
            .and_then(|fields| ArchiveFilter::from_fields(&fields))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("/2012/11/index"), "/2012/11");
        assert_eq!(normalize_path("/2012/11/20-test-post/index"), "/2012/11/20-test-post");
        assert_eq!(normalize_path("/archive/"), "/archive");
        assert_eq!(normalize_path("/archive"), "/archive");
        assert_eq!(normalize_path("/index"), "/");
        assert_eq!(normalize_path("/"), "/");
    }

    #[test]
    fn test_normalize_keeps_index_like_titles() {
        assert_eq!(normalize_path("/2012/11/20-index"), "/2012/11/20-index");
    }

    #[test]
    fn test_filter_from_no_fields() {
        assert_eq!(ArchiveFilter::from_fields(&[]), Some(ArchiveFilter::All));
    }

    #[test]
    fn test_filter_from_date_fields() {
        let filter =
            ArchiveFilter::from_fields(&[(Field::Year, "2012"), (Field::Month, "02")]).unwrap();

        assert_eq!(filter, ArchiveFilter::Month { year: 2012, month: 2 });
        assert_eq!(filter.dimension(), Dimension::Month);
        assert_eq!(filter.year(), Some(2012));
        assert_eq!(filter.month(), Some(2));
        assert_eq!(filter.date(), None);
        assert_eq!(filter.tag(), None);
    }

    #[test]
    fn test_filter_from_tag() {
        let filter = ArchiveFilter::from_fields(&[(Field::Tag, "life")]).unwrap();

        assert_eq!(filter.dimension(), Dimension::Tag);
        assert_eq!(filter.tag(), Some("life"));
        assert_eq!(filter.year(), None);
    }

    #[test]
    fn test_filter_rejects_month_without_year() {
        assert_eq!(ArchiveFilter::from_fields(&[(Field::Month, "02")]), None);
        assert_eq!(
            ArchiveFilter::from_fields(&[(Field::Year, "2012"), (Field::Date, "03")]),
            None
        );
    }

    #[test]
    fn test_filter_rejects_tag_with_dates() {
        assert_eq!(
            ArchiveFilter::from_fields(&[(Field::Tag, "rust"), (Field::Year, "2012")]),
            None
        );
    }

    #[test]
    fn test_filter_rejects_title() {
        assert_eq!(ArchiveFilter::from_fields(&[(Field::Title, "hello")]), None);
    }

    #[test]
    fn test_classification_serializes_with_kind() {
        let json = serde_json::to_value(Classification::Archive(ArchiveFilter::Year {
            year: 2011,
        }))
        .unwrap();

        assert_eq!(
            json,
            serde_json::json!({ "kind": "archive", "dimension": "year", "year": 2011 })
        );
    }
}
