// src/models/board.rs

//! Board snapshot records as returned by the monday.com API.
//!
//! The upstream schema has shipped in three shapes over time (groups with
//! items, items with subitems, items with a group reference). All three
//! deserialize into the same records; [`RawBoard::shape`] tells them apart.

use serde::{Deserialize, Deserializer, Serialize};

/// Top-level `data` object of a board query.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoardSnapshot {
    #[serde(default, deserialize_with = "nullable_vec")]
    pub boards: Vec<RawBoard>,
}

impl BoardSnapshot {
    /// All `(identity, item)` entries across boards, in board order.
    pub fn entries(&self) -> Vec<BoardEntry<'_>> {
        self.boards
            .iter()
            .flat_map(|board| board.shape().entries())
            .collect()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawBoard {
    #[serde(default)]
    pub name: String,

    #[serde(default, deserialize_with = "nullable_vec")]
    pub columns: Vec<ColumnMeta>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<RawGroup>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items_page: Option<ItemsPage>,
}

impl RawBoard {
    /// Resolve which upstream shape this board was returned in.
    pub fn shape(&self) -> BoardShape<'_> {
        if let Some(groups) = &self.groups {
            return BoardShape::Grouped(groups);
        }
        match &self.items_page {
            Some(page) if page.items.iter().any(|item| !item.subitems.is_empty()) => {
                BoardShape::Nested(&page.items)
            }
            Some(page) => BoardShape::Flat(&page.items),
            None => BoardShape::Empty,
        }
    }
}

/// The shape a board snapshot arrived in.
#[derive(Debug, Clone, Copy)]
pub enum BoardShape<'a> {
    /// Groups (one per owner) holding certificate items
    Grouped(&'a [RawGroup]),
    /// Items (one per owner) holding certificate subitems
    Nested(&'a [RawItem]),
    /// Certificate items carrying a reference to their owner group
    Flat(&'a [RawItem]),
    Empty,
}

impl<'a> BoardShape<'a> {
    pub fn name(&self) -> &'static str {
        match self {
            BoardShape::Grouped(_) => "grouped",
            BoardShape::Nested(_) => "nested",
            BoardShape::Flat(_) => "flat",
            BoardShape::Empty => "empty",
        }
    }

    /// Every top-level item paired with its group identity.
    ///
    /// The identity is the owning group's title, or the item's own name when
    /// the item carries no group reference.
    pub fn entries(&self) -> Vec<BoardEntry<'a>> {
        match *self {
            BoardShape::Grouped(groups) => groups
                .iter()
                .flat_map(|group| {
                    group.items().iter().map(move |item| BoardEntry {
                        identity: &group.title,
                        item,
                    })
                })
                .collect(),
            BoardShape::Nested(items) | BoardShape::Flat(items) => items
                .iter()
                .map(|item| BoardEntry {
                    identity: item.identity(),
                    item,
                })
                .collect(),
            BoardShape::Empty => Vec::new(),
        }
    }

    /// Number of top-level items in this shape.
    pub fn item_count(&self) -> usize {
        match *self {
            BoardShape::Grouped(groups) => groups.iter().map(|g| g.items().len()).sum(),
            BoardShape::Nested(items) | BoardShape::Flat(items) => items.len(),
            BoardShape::Empty => 0,
        }
    }
}

/// An item together with the name it is searched by.
#[derive(Debug, Clone, Copy)]
pub struct BoardEntry<'a> {
    pub identity: &'a str,
    pub item: &'a RawItem,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ColumnMeta {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub title: String,

    #[serde(rename = "type", default)]
    pub kind: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawGroup {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<RawItem>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items_page: Option<ItemsPage>,
}

impl RawGroup {
    /// Items of this group, whichever field the API used.
    pub fn items(&self) -> &[RawItem] {
        match (&self.items, &self.items_page) {
            (Some(items), _) => items,
            (None, Some(page)) => &page.items,
            (None, None) => &[],
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemsPage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,

    #[serde(default, deserialize_with = "nullable_vec")]
    pub items: Vec<RawItem>,
}

/// Reference from an item to its owning group.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroupRef {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawItem {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<GroupRef>,

    #[serde(
        rename = "column_values",
        default,
        deserialize_with = "nullable_vec"
    )]
    pub columns: Vec<RawColumn>,

    #[serde(
        default,
        deserialize_with = "nullable_vec",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub subitems: Vec<RawItem>,
}

impl RawItem {
    /// Owning group title, or the item name when ungrouped.
    pub fn identity(&self) -> &str {
        match &self.group {
            Some(group) if !group.title.trim().is_empty() => &group.title,
            _ => &self.name,
        }
    }
}

/// One column value on an item.
///
/// `value` and `text` are two views of the same datum: `text` is the
/// rendered display string, `value` a JSON-encoded structure (or,
/// occasionally, a bare string). Either may be missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawColumn {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub value: Option<String>,

    #[serde(default)]
    pub text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<ColumnMeta>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl RawColumn {
    /// Column title, empty when the API omitted the column metadata.
    pub fn title(&self) -> &str {
        self.column.as_ref().map_or("", |c| c.title.as_str())
    }

    pub fn kind(&self) -> ColumnKind {
        ColumnKind::from_type(self.column.as_ref().map_or("", |c| c.kind.as_str()))
    }

    /// Display text, unless blank or the `-` placeholder.
    pub fn display_text(&self) -> Option<&str> {
        present(self.text.as_deref())
    }

    /// Raw value, unless blank, `-`, or the literal `null`.
    pub fn raw_value(&self) -> Option<&str> {
        present(self.value.as_deref()).filter(|v| v.trim() != "null")
    }
}

fn present(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.trim().is_empty() && s.trim() != "-")
}

/// Upstream column types this service cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Status,
    Date,
    Link,
    BoardRelation,
    Lookup,
    Mirror,
    Other,
}

impl ColumnKind {
    pub fn from_type(kind: &str) -> Self {
        match kind.trim().to_lowercase().replace('_', "-").as_str() {
            "text" | "long-text" => ColumnKind::Text,
            "status" | "color" => ColumnKind::Status,
            "date" => ColumnKind::Date,
            "link" => ColumnKind::Link,
            "board-relation" => ColumnKind::BoardRelation,
            "lookup" => ColumnKind::Lookup,
            "mirror" => ColumnKind::Mirror,
            _ => ColumnKind::Other,
        }
    }

    /// Whether values of this kind are mirrored from another board.
    pub fn is_linked(self) -> bool {
        matches!(
            self,
            ColumnKind::BoardRelation | ColumnKind::Lookup | ColumnKind::Mirror
        )
    }
}

/// Treat an explicit JSON `null` list the same as a missing one.
fn nullable_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
