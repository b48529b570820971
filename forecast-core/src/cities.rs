use crate::model::Coordinate;

/// The fixed city table the dashboard offers.
///
/// TODO: source coordinates from a geocoding service instead of shipping
/// them with the binary.
pub const fn known_cities() -> &'static [(&'static str, Coordinate)] {
    &[
        (
            "Boston",
            Coordinate {
                latitude: 42.3601,
                longitude: 71.0589,
            },
        ),
        (
            "New York City",
            Coordinate {
                latitude: 40.7128,
                longitude: 74.0060,
            },
        ),
        (
            "San Francisco",
            Coordinate {
                latitude: 37.7749,
                longitude: 122.4194,
            },
        ),
        (
            "Tokyo",
            Coordinate {
                latitude: 35.6764,
                longitude: 139.6500,
            },
        ),
        (
            "Dubai",
            Coordinate {
                latitude: 25.2048,
                longitude: 55.2708,
            },
        ),
    ]
}

/// Case-insensitive lookup into [`known_cities`].
pub fn city_coordinate(name: &str) -> Option<Coordinate> {
    known_cities()
        .iter()
        .find(|(city, _)| city.eq_ignore_ascii_case(name))
        .map(|(_, coordinate)| *coordinate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_holds_exactly_five_cities() {
        assert_eq!(known_cities().len(), 5);
    }

    #[test]
    fn boston_and_tokyo_coordinates_are_stable() {
        let boston = city_coordinate("Boston").expect("Boston must be known");
        assert_eq!(boston.latitude, 42.3601);
        assert_eq!(boston.longitude, 71.0589);

        let tokyo = city_coordinate("Tokyo").expect("Tokyo must be known");
        assert_eq!(tokyo.latitude, 35.6764);
        assert_eq!(tokyo.longitude, 139.6500);

        // Lookup is a pure function of the static table.
        let again = city_coordinate("Tokyo").unwrap();
        assert_eq!(again, tokyo);
    }

    #[test]
    fn lookup_ignores_case() {
        assert!(city_coordinate("san francisco").is_some());
        assert!(city_coordinate("DUBAI").is_some());
    }

    #[test]
    fn unknown_city_is_none() {
        assert!(city_coordinate("Atlantis").is_none());
    }
}
