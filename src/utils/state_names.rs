//! Mapping from API state names to the `st_nm` values in the boundary
//! GeoJSON. The business system and the census boundaries disagree on a
//! handful of union territories and renamed states.

/// Pairs of (API name, GeoJSON name). Identity rows are listed so the table
/// doubles as the set of known states.
const STATE_NAME_MAP: &[(&str, &str)] = &[
    ("Delhi", "Delhi"),
    ("NCT of Delhi", "Delhi"),
    ("Haryana", "Haryana"),
    ("West Bengal", "West Bengal"),
    ("Uttar Pradesh", "Uttar Pradesh"),
    ("Maharashtra", "Maharashtra"),
    ("Karnataka", "Karnataka"),
    ("Tamil Nadu", "Tamil Nadu"),
    ("Telangana", "Telangana"),
    ("Andhra Pradesh", "Andhra Pradesh"),
    ("Punjab", "Punjab"),
    ("Gujarat", "Gujarat"),
    ("Rajasthan", "Rajasthan"),
    ("Madhya Pradesh", "Madhya Pradesh"),
    ("Bihar", "Bihar"),
    ("Odisha", "Odisha"),
    ("Kerala", "Kerala"),
    ("Assam", "Assam"),
    ("Chhattisgarh", "Chhattisgarh"),
    ("Jharkhand", "Jharkhand"),
    ("Goa", "Goa"),
    ("Tripura", "Tripura"),
    ("Manipur", "Manipur"),
    ("Himachal Pradesh", "Himachal Pradesh"),
    ("Uttarakhand", "Uttarakhand"),
    ("Jammu and Kashmir", "Jammu & Kashmir"),
    ("Jammu & Kashmir", "Jammu & Kashmir"),
    ("Ladakh", "Ladakh"),
    ("Puducherry", "Puducherry"),
    ("Chandigarh", "Chandigarh"),
    ("Meghalaya", "Meghalaya"),
    ("Nagaland", "Nagaland"),
    ("Sikkim", "Sikkim"),
    ("Mizoram", "Mizoram"),
    ("Arunachal Pradesh", "Arunachal Pradesh"),
    ("Andaman and Nicobar Islands", "Andaman & Nicobar Island"),
    ("Andaman & Nicobar Islands", "Andaman & Nicobar Island"),
    ("Dadra and Nagar Haveli and Daman and Diu", "Dadra and Nagar Haveli"),
    ("Dadra & Nagar Haveli and Daman & Diu", "Dadra and Nagar Haveli"),
    ("Lakshadweep", "Lakshadweep"),
];

/// Translate an API state name to its GeoJSON `st_nm` value. Names absent
/// from the table pass through unchanged; that is a documented fallback, not
/// an error.
pub fn map_api_state_to_geojson(api_state: &str) -> String {
    let trimmed = api_state.trim();
    STATE_NAME_MAP
        .iter()
        .find(|(api, _)| *api == trimmed || api.eq_ignore_ascii_case(trimmed))
        .map(|(_, geo)| geo.to_string())
        .unwrap_or_else(|| api_state.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_union_territory_renames() {
        assert_eq!(map_api_state_to_geojson("NCT of Delhi"), "Delhi");
        assert_eq!(
            map_api_state_to_geojson("Andaman and Nicobar Islands"),
            "Andaman & Nicobar Island"
        );
        assert_eq!(
            map_api_state_to_geojson("Jammu and Kashmir"),
            "Jammu & Kashmir"
        );
    }

    #[test]
    fn unknown_names_pass_through() {
        assert_eq!(map_api_state_to_geojson("Atlantis"), "Atlantis");
    }

    #[test]
    fn matching_is_trim_and_case_tolerant() {
        assert_eq!(map_api_state_to_geojson("  kerala "), "Kerala");
    }
}
