//! Conversion from remote station DTOs to domain stations.

use tracing::debug;

use crate::domain::{Coord, LineKey, Station, StationId};

use super::client::StationDto;

/// Convert a remote station list into domain stations for `line`.
///
/// Entries without a title or with missing or out-of-range coordinates are
/// dropped. Toilet metadata and running times are carried over from the
/// static catalog when a catalog station on the same line has the same
/// name; the remote identifier and coordinates are kept as fetched. The
/// result is sorted by name.
pub fn convert_stations(dtos: Vec<StationDto>, line: &LineKey, catalog: &[Station]) -> Vec<Station> {
    let mut stations: Vec<Station> = dtos
        .into_iter()
        .filter_map(|dto| convert_station(dto, line, catalog))
        .collect();

    stations.sort_by(|a, b| a.name.cmp(&b.name));
    stations
}

fn convert_station(dto: StationDto, line: &LineKey, catalog: &[Station]) -> Option<Station> {
    let name = match dto.title {
        Some(title) if !title.trim().is_empty() => title.trim().to_string(),
        _ => {
            debug!(id = %dto.same_as, "skipping remote station without a title");
            return None;
        }
    };

    let coord = match (dto.lat, dto.long) {
        (Some(lat), Some(lng)) => Coord::new(lat, lng).ok(),
        _ => None,
    };
    let Some(coord) = coord else {
        debug!(id = %dto.same_as, "skipping remote station without usable coordinates");
        return None;
    };

    let known = catalog.iter().find(|s| s.name == name);

    Some(Station {
        id: StationId::Code(dto.same_as),
        name,
        line: line.clone(),
        lat: coord.lat,
        lng: coord.lng,
        has_toilet_inside: known.is_some_and(|s| s.has_toilet_inside),
        stalls: known.and_then(|s| s.stalls),
        next_time: known.and_then(|s| s.next_time),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::StationDirectory;

    fn dto(id: &str, title: Option<&str>, lat: Option<f64>, long: Option<f64>) -> StationDto {
        StationDto {
            same_as: id.to_string(),
            title: title.map(str::to_string),
            lat,
            long,
        }
    }

    fn yamanote() -> LineKey {
        LineKey::normalize("yamanote")
    }

    #[test]
    fn maps_fields_and_injects_line() {
        let stations = convert_stations(
            vec![dto("odpt.Station:A", Some("品川"), Some(35.6285), Some(139.7388))],
            &yamanote(),
            &[],
        );
        assert_eq!(stations.len(), 1);
        let s = &stations[0];
        assert_eq!(s.id, StationId::from("odpt.Station:A"));
        assert_eq!(s.name, "品川");
        assert_eq!(s.line, yamanote());
        assert_eq!(s.lat, 35.6285);
        assert_eq!(s.lng, 139.7388);
        assert!(!s.has_toilet_inside);
        assert!(s.stalls.is_none());
    }

    #[test]
    fn sorts_by_name() {
        let stations = convert_stations(
            vec![
                dto("c", Some("Shinbashi"), Some(35.66), Some(139.75)),
                dto("a", Some("Akihabara"), Some(35.69), Some(139.77)),
                dto("b", Some("Kanda"), Some(35.69), Some(139.77)),
            ],
            &yamanote(),
            &[],
        );
        let names: Vec<_> = stations.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Akihabara", "Kanda", "Shinbashi"]);
    }

    #[test]
    fn skips_incomplete_entries() {
        let stations = convert_stations(
            vec![
                dto("no-title", None, Some(35.0), Some(139.0)),
                dto("blank-title", Some("  "), Some(35.0), Some(139.0)),
                dto("no-lat", Some("A"), None, Some(139.0)),
                dto("bad-lat", Some("B"), Some(135.0), Some(39.0)),
                dto("ok", Some("C"), Some(35.0), Some(139.0)),
            ],
            &yamanote(),
            &[],
        );
        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0].name, "C");
    }

    #[test]
    fn merges_catalog_metadata_by_name() {
        let dir = StationDirectory::embedded().unwrap();
        let catalog = dir.stations_by_line("yamanote");
        let stations = convert_stations(
            vec![dto(
                "odpt.Station:JR-East.Yamanote.Tokyo",
                Some("東京"),
                Some(35.6812),
                Some(139.7671),
            )],
            &yamanote(),
            catalog,
        );
        let tokyo = &stations[0];
        assert!(tokyo.has_toilet_inside);
        assert_eq!(tokyo.stalls, Some(10));
        assert_eq!(tokyo.next_time, Some(120));
        // remote position wins
        assert_eq!(tokyo.lat, 35.6812);
    }
}
