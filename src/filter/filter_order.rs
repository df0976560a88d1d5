use std::cmp::Ordering;

use super::error::SortError;
use super::types::{PlantSort, SortDirection, SortField};
use crate::database::models::Plant;

pub struct FilterOrder;

impl FilterOrder {
    /// Parse a `sort` query value such as `name,desc`. A missing or blank
    /// value means `name,asc`; a missing direction means ascending.
    pub fn parse(sort: Option<&str>) -> Result<PlantSort, SortError> {
        let raw = match sort.map(str::trim) {
            None | Some("") => return Ok(PlantSort::default()),
            Some(s) => s,
        };

        let mut parts = raw.splitn(2, ',');
        let field = Self::parse_field(parts.next().unwrap_or_default().trim())?;
        let direction = match parts.next().map(str::trim) {
            None | Some("") => SortDirection::Asc,
            Some(dir) => Self::parse_direction(dir)?,
        };

        Ok(PlantSort { field, direction })
    }

    fn parse_field(s: &str) -> Result<SortField, SortError> {
        match s {
            "name" => Ok(SortField::Name),
            "lastWateredAt" | "last_watered_at" => Ok(SortField::LastWateredAt),
            "createdAt" | "created_at" => Ok(SortField::CreatedAt),
            other => Err(SortError::InvalidField(other.to_string())),
        }
    }

    fn parse_direction(s: &str) -> Result<SortDirection, SortError> {
        if s.eq_ignore_ascii_case("asc") {
            Ok(SortDirection::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Ok(SortDirection::Desc)
        } else {
            Err(SortError::InvalidDirection(s.to_string()))
        }
    }

    /// ORDER BY clause for the Postgres backend. Ties break on id so paging
    /// through equal names stays stable.
    pub fn generate(sort: &PlantSort) -> String {
        format!(
            "ORDER BY {} {}, id ASC",
            sort.field.to_sql(),
            sort.direction.to_sql()
        )
    }

    /// Same ordering as `generate`, for in-memory listings. Never-watered
    /// plants sort last ascending and first descending, as Postgres does.
    pub fn compare(sort: &PlantSort, a: &Plant, b: &Plant) -> Ordering {
        let primary = match sort.field {
            SortField::Name => a.name.as_bytes().cmp(b.name.as_bytes()),
            SortField::LastWateredAt => match (a.last_watered_at, b.last_watered_at) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        };

        let primary = match sort.direction {
            SortDirection::Asc => primary,
            SortDirection::Desc => primary.reverse(),
        };

        primary.then_with(|| a.id.cmp(&b.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    fn plant(name: &str, watered_days_ago: Option<i64>) -> Plant {
        Plant {
            id: Uuid::new_v4(),
            name: name.to_string(),
            last_watered_at: watered_days_ago.map(|d| Utc::now() - Duration::days(d)),
            user_id: Uuid::nil(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn defaults_to_name_ascending() {
        assert_eq!(FilterOrder::parse(None).unwrap(), PlantSort::default());
        assert_eq!(FilterOrder::parse(Some("")).unwrap(), PlantSort::default());
        assert_eq!(
            FilterOrder::parse(Some("name")).unwrap(),
            PlantSort { field: SortField::Name, direction: SortDirection::Asc }
        );
    }

    #[test]
    fn parses_field_and_direction() {
        assert_eq!(
            FilterOrder::parse(Some("name,desc")).unwrap(),
            PlantSort { field: SortField::Name, direction: SortDirection::Desc }
        );
        assert_eq!(
            FilterOrder::parse(Some("lastWateredAt,ASC")).unwrap(),
            PlantSort { field: SortField::LastWateredAt, direction: SortDirection::Asc }
        );
        assert_eq!(
            FilterOrder::parse(Some("created_at, desc")).unwrap(),
            PlantSort { field: SortField::CreatedAt, direction: SortDirection::Desc }
        );
    }

    #[test]
    fn rejects_unknown_direction() {
        assert_eq!(
            FilterOrder::parse(Some("name,upside_down")),
            Err(SortError::InvalidDirection("upside_down".to_string()))
        );
    }

    #[test]
    fn rejects_unknown_field() {
        assert_eq!(
            FilterOrder::parse(Some("password_hash,asc")),
            Err(SortError::InvalidField("password_hash".to_string()))
        );
        assert!(FilterOrder::parse(Some("name; DROP TABLE plants,asc")).is_err());
    }

    #[test]
    fn generates_whitelisted_order_by() {
        let sort = PlantSort { field: SortField::Name, direction: SortDirection::Desc };
        assert_eq!(FilterOrder::generate(&sort), "ORDER BY name COLLATE \"C\" DESC, id ASC");
    }

    #[test]
    fn compares_names_lexicographically() {
        let mut plants = vec![plant("Paproć", None), plant("Mięta", None), plant("Oleander", None)];

        let asc = PlantSort::default();
        plants.sort_by(|a, b| FilterOrder::compare(&asc, a, b));
        let names: Vec<&str> = plants.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Mięta", "Oleander", "Paproć"]);

        let desc = PlantSort { direction: SortDirection::Desc, ..asc };
        plants.sort_by(|a, b| FilterOrder::compare(&desc, a, b));
        let names: Vec<&str> = plants.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Paproć", "Oleander", "Mięta"]);
    }

    #[test]
    fn never_watered_sorts_last_ascending() {
        let mut plants = vec![plant("a", None), plant("b", Some(1)), plant("c", Some(3))];
        let sort = PlantSort { field: SortField::LastWateredAt, direction: SortDirection::Asc };
        plants.sort_by(|a, b| FilterOrder::compare(&sort, a, b));
        let names: Vec<&str> = plants.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["c", "b", "a"]);

        let sort = PlantSort { direction: SortDirection::Desc, ..sort };
        plants.sort_by(|a, b| FilterOrder::compare(&sort, a, b));
        let names: Vec<&str> = plants.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["a", "b", "c"]);
    }
}
