//! Normalization of a raw geocoder address-component bag into an [`Address`].

use revgeo_core::Address;

/// Keys that all denote the settlement a point belongs to.
const CITY_KEYS: [&str; 5] = ["suburb", "village", "town", "city", "hamlet"];

/// Maps raw address components onto the four [`Address`] fields.
///
/// - any key containing `"number"` becomes `street_number`
/// - `"road"` becomes `street`
/// - `suburb`, `village`, `town`, `city`, `hamlet` become `city`
/// - `"country"` becomes `country`
///
/// Other keys are ignored. When several keys land on the same field the last
/// one visited wins. An empty input yields an empty [`Address`].
#[must_use]
pub fn parse_address<'a, I>(components: I) -> Address
where
    I: IntoIterator<Item = (&'a String, &'a String)>,
{
    let mut address = Address::default();

    for (key, value) in components {
        let key = key.as_str();
        if key.contains("number") {
            address.street_number = Some(value.clone());
        } else if key == "road" {
            address.street = Some(value.clone());
        } else if CITY_KEYS.contains(&key) {
            address.city = Some(value.clone());
        } else if key == "country" {
            address.country = Some(value.clone());
        }
    }

    address
}
