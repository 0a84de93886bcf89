//! Nearest-station search.

use crate::domain::{Coord, Station};

/// Find the station closest to `user`, skipping any named `exclude`.
///
/// Linear scan. On exact ties the first station encountered wins. Returns
/// `None` when there are no candidates left after exclusion; that is a normal
/// outcome, not an error.
pub fn nearest<'a, I>(candidates: I, user: Coord, exclude: Option<&str>) -> Option<&'a Station>
where
    I: IntoIterator<Item = &'a Station>,
{
    nearest_with_distance(candidates, user, exclude).map(|(station, _)| station)
}

/// Like [`nearest`], also returning the distance in kilometres.
pub fn nearest_with_distance<'a, I>(
    candidates: I,
    user: Coord,
    exclude: Option<&str>,
) -> Option<(&'a Station, f64)>
where
    I: IntoIterator<Item = &'a Station>,
{
    let mut best: Option<(&Station, f64)> = None;

    for station in candidates {
        if exclude.is_some_and(|name| station.name == name) {
            continue;
        }
        let d = user.distance_km(station.coord());
        match best {
            None => best = Some((station, d)),
            // strict `<` keeps the earlier station on ties
            Some((_, best_d)) if d < best_d => best = Some((station, d)),
            Some(_) => {}
        }
    }

    best
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::{LineKey, StationId};
    use proptest::prelude::*;

    fn stations() -> impl Strategy<Value = Vec<Station>> {
        prop::collection::vec((35.0f64..36.0, 139.0f64..140.0, 0u8..4), 1..8).prop_map(|v| {
            v.into_iter()
                .enumerate()
                .map(|(i, (lat, lng, name))| Station {
                    id: StationId::Number(i as u64),
                    name: format!("S{name}"),
                    line: LineKey::normalize("test"),
                    lat,
                    lng,
                    has_toilet_inside: false,
                    stalls: None,
                    next_time: None,
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn never_returns_excluded(
            stations in stations(),
            lat in 35.0f64..36.0,
            lng in 139.0f64..140.0,
            excluded in 0u8..4,
        ) {
            let excluded = format!("S{excluded}");
            let user = Coord::unchecked(lat, lng);
            let result = nearest(&stations, user, Some(&excluded));

            let others_exist = stations.iter().any(|s| s.name != excluded);
            prop_assert_eq!(result.is_some(), others_exist);
            if let Some(s) = result {
                prop_assert_ne!(&s.name, &excluded);
            }
        }

        #[test]
        fn result_is_minimal(
            stations in stations(),
            lat in 35.0f64..36.0,
            lng in 139.0f64..140.0,
        ) {
            let user = Coord::unchecked(lat, lng);
            let (_, best) = nearest_with_distance(&stations, user, None).unwrap();
            for s in &stations {
                prop_assert!(best <= user.distance_km(s.coord()));
            }
        }
    }
}
