//! Plain-text rendering of apartments

use std::fmt::Write;

use stayfolio_types::Apartment;

/// One line per apartment for the list view
pub fn apartment_line(apartment: &Apartment) -> String {
    let mut line = format!("{:<12} {}", apartment.id, apartment.title);
    if let Some(price) = apartment.price_per_night {
        let _ = write!(line, "  ({}/night)", number(price));
    }
    line
}

/// Full detail view
pub fn apartment_details(apartment: &Apartment) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", apartment.title);
    let _ = writeln!(out, "  id:          {}", apartment.id);

    let fields = [
        ("address", apartment.address.clone()),
        ("surface", apartment.surface.map(|v| format!("{} m²", number(v)))),
        ("rooms", apartment.rooms.map(number)),
        ("price/night", apartment.price_per_night.map(number)),
        ("image", apartment.image_url.clone()),
    ];
    for (label, value) in fields {
        if let Some(value) = value {
            let _ = writeln!(out, "  {:<12} {}", format!("{label}:"), value);
        }
    }

    if let Some(description) = &apartment.description {
        let _ = writeln!(out);
        let _ = writeln!(out, "{description}");
    }
    out
}

fn number(value: f64) -> String {
    value.to_string()
}
