//! Camera helpers that stay pure: bounds math here, the `fitBounds` /
//! `easeTo` calls at the FFI edge.

use crate::map::markers::parse_coordinates;
use crate::models::Location;

/// Southwest/northeast corners (`(lng, lat)` pairs) covering every
/// placeable location, or `None` when nothing can be placed.
pub fn bounds_for(locations: &[Location]) -> Option<((f64, f64), (f64, f64))> {
    let mut coords = locations.iter().filter_map(parse_coordinates);

    let (first_lng, first_lat) = coords.next()?;
    let mut sw = (first_lng, first_lat);
    let mut ne = (first_lng, first_lat);

    for (lng, lat) in coords {
        sw.0 = sw.0.min(lng);
        sw.1 = sw.1.min(lat);
        ne.0 = ne.0.max(lng);
        ne.1 = ne.1.max(lat);
    }

    Some((sw, ne))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn location(lat: f64, lng: f64) -> Location {
        serde_json::from_value(json!({
            "location_name": "t",
            "latitude": lat,
            "longitude": lng,
        }))
        .unwrap()
    }

    #[test]
    fn bounds_cover_all_placeable_points() {
        let locations = vec![
            location(28.6, 77.2),
            location(12.97, 77.59),
            location(19.07, 72.87),
        ];
        let (sw, ne) = bounds_for(&locations).unwrap();
        assert_eq!(sw, (72.87, 12.97));
        assert_eq!(ne, (77.59, 28.6));
    }

    #[test]
    fn unplaceable_rows_are_ignored() {
        let mut locations = vec![location(28.6, 77.2)];
        locations.push(
            serde_json::from_value(json!({"location_name": "x", "latitude": "NaN"})).unwrap(),
        );
        let (sw, ne) = bounds_for(&locations).unwrap();
        assert_eq!(sw, ne);
    }

    #[test]
    fn no_placeable_rows_means_no_bounds() {
        let locations: Vec<Location> =
            vec![serde_json::from_value(json!({"location_name": "x"})).unwrap()];
        assert_eq!(bounds_for(&locations), None);
        assert_eq!(bounds_for(&[]), None);
    }
}
