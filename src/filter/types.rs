#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn to_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Plant columns a listing may be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Name,
    LastWateredAt,
    CreatedAt,
}

impl SortField {
    /// Whitelisted ORDER BY expression for the Postgres backend.
    pub fn to_sql(&self) -> &'static str {
        match self {
            SortField::Name => "name COLLATE \"C\"",
            SortField::LastWateredAt => "last_watered_at",
            SortField::CreatedAt => "created_at",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlantSort {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for PlantSort {
    fn default() -> Self {
        Self {
            field: SortField::Name,
            direction: SortDirection::Asc,
        }
    }
}
