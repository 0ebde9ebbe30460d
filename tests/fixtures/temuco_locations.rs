//! Temuco locations for realistic fixtures.
//!
//! Coordinates are approximate street positions from OpenStreetMap. They are
//! routable with an OSRM extract of Chile.

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn coords(&self) -> (f64, f64) {
        (self.lat, self.lng)
    }
}

/// City centre, used as the live position in tests.
pub const PLAZA_DE_ARMAS: Location = Location::new("Plaza Aníbal Pinto", -38.7390, -72.5905);

// ============================================================================
// Downtown
// ============================================================================

pub const DOWNTOWN: &[Location] = &[
    Location::new("Mercado Municipal", -38.7378, -72.5898),
    Location::new("Catedral de Temuco", -38.7387, -72.5910),
    Location::new("Estación de Ferrocarriles", -38.7417, -72.5810),
    Location::new("Terminal Rodoviario", -38.7260, -72.5800),
    Location::new("Hospital Hernán Henríquez", -38.7447, -72.6010),
];

// ============================================================================
// Outlying neighbourhoods (outside the downtown sector)
// ============================================================================

pub const OUTLYING: &[Location] = &[
    Location::new("Universidad de La Frontera", -38.7470, -72.6160),
    Location::new("Cerro Ñielol", -38.7230, -72.5870),
    Location::new("Labranza", -38.7690, -72.7310),
    Location::new("Padre Las Casas", -38.7660, -72.5950),
];

/// Rectangle around downtown: (south, west), (north, east).
pub const DOWNTOWN_SECTOR: ((f64, f64), (f64, f64)) = ((-38.7460, -72.6050), (-38.7250, -72.5780));

/// All locations as a CSV export with the spreadsheet's headers.
pub fn csv_export() -> String {
    let mut csv = String::from("Direccion,Latitud,Longitud,Distancia_km\n");
    for (i, location) in DOWNTOWN.iter().chain(OUTLYING.iter()).enumerate() {
        csv.push_str(&format!(
            "{},{},{},{}\n",
            location.name,
            location.lat,
            location.lng,
            i as f64 * 0.5
        ));
    }
    csv
}
