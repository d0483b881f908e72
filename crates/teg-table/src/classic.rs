//! The classic 50-country TEG map.
//!
//! | Continent     | Countries | Bonus |
//! |---------------|-----------|-------|
//! | South America | 6         | 3     |
//! | North America | 10        | 5     |
//! | Europe        | 9         | 5     |
//! | Asia          | 15        | 7     |
//! | Africa        | 6         | 3     |
//! | Oceania       | 4         | 2     |

use crate::board::Board;
use crate::error::TableError;

/// South America.
pub const SOUTH_AMERICA: &str = "South America";
/// North America.
pub const NORTH_AMERICA: &str = "North America";
/// Europe.
pub const EUROPE: &str = "Europe";
/// Asia.
pub const ASIA: &str = "Asia";
/// Africa.
pub const AFRICA: &str = "Africa";
/// Oceania.
pub const OCEANIA: &str = "Oceania";

/// `(continent, bonus, countries)`.
const CONTINENTS: [(&str, u32, &[&str]); 6] = [
    (
        SOUTH_AMERICA,
        3,
        &["Argentina", "Brasil", "Chile", "Colombia", "Peru", "Uruguay"],
    ),
    (
        NORTH_AMERICA,
        5,
        &[
            "Alaska",
            "California",
            "Canada",
            "Groenlandia",
            "Labrador",
            "Mexico",
            "Nueva York",
            "Oregon",
            "Terranova",
            "Yukon",
        ],
    ),
    (
        EUROPE,
        5,
        &[
            "Alemania",
            "Espana",
            "Francia",
            "Gran Bretana",
            "Islandia",
            "Italia",
            "Polonia",
            "Rusia",
            "Suecia",
        ],
    ),
    (
        ASIA,
        7,
        &[
            "Arabia",
            "Aral",
            "China",
            "Gobi",
            "India",
            "Iran",
            "Israel",
            "Japon",
            "Kamchatka",
            "Malasia",
            "Mongolia",
            "Siberia",
            "Taimir",
            "Tartaria",
            "Turquia",
        ],
    ),
    (
        AFRICA,
        3,
        &["Egipto", "Etiopia", "Madagascar", "Sahara", "Sudafrica", "Zaire"],
    ),
    (OCEANIA, 2, &["Australia", "Borneo", "Java", "Sumatra"]),
];

/// Every border, listed once.
const BORDERS: &[(&str, &str)] = &[
    // South America
    ("Argentina", "Chile"),
    ("Argentina", "Peru"),
    ("Argentina", "Uruguay"),
    ("Argentina", "Brasil"),
    ("Brasil", "Uruguay"),
    ("Brasil", "Peru"),
    ("Brasil", "Colombia"),
    ("Chile", "Peru"),
    ("Colombia", "Peru"),
    // North America
    ("Alaska", "Yukon"),
    ("Alaska", "Oregon"),
    ("Yukon", "Oregon"),
    ("Yukon", "Canada"),
    ("Oregon", "Canada"),
    ("Oregon", "Nueva York"),
    ("Oregon", "California"),
    ("California", "Nueva York"),
    ("California", "Mexico"),
    ("Canada", "Nueva York"),
    ("Canada", "Terranova"),
    ("Nueva York", "Terranova"),
    ("Nueva York", "Groenlandia"),
    ("Terranova", "Labrador"),
    ("Labrador", "Groenlandia"),
    // Europe
    ("Islandia", "Gran Bretana"),
    ("Islandia", "Suecia"),
    ("Gran Bretana", "Espana"),
    ("Gran Bretana", "Alemania"),
    ("Espana", "Francia"),
    ("Francia", "Alemania"),
    ("Francia", "Italia"),
    ("Italia", "Alemania"),
    ("Alemania", "Polonia"),
    ("Polonia", "Rusia"),
    ("Rusia", "Suecia"),
    // Africa
    ("Sahara", "Egipto"),
    ("Sahara", "Etiopia"),
    ("Sahara", "Zaire"),
    ("Egipto", "Etiopia"),
    ("Egipto", "Madagascar"),
    ("Etiopia", "Zaire"),
    ("Etiopia", "Sudafrica"),
    ("Zaire", "Sudafrica"),
    ("Zaire", "Madagascar"),
    // Asia
    ("Turquia", "Iran"),
    ("Turquia", "Arabia"),
    ("Turquia", "Israel"),
    ("Israel", "Arabia"),
    ("Iran", "Aral"),
    ("Iran", "Mongolia"),
    ("Iran", "China"),
    ("Iran", "India"),
    ("Iran", "Gobi"),
    ("India", "China"),
    ("India", "Malasia"),
    ("Malasia", "China"),
    ("China", "Mongolia"),
    ("China", "Gobi"),
    ("China", "Siberia"),
    ("China", "Kamchatka"),
    ("China", "Japon"),
    ("Gobi", "Mongolia"),
    ("Mongolia", "Aral"),
    ("Mongolia", "Siberia"),
    ("Aral", "Siberia"),
    ("Aral", "Tartaria"),
    ("Tartaria", "Siberia"),
    ("Tartaria", "Taimir"),
    ("Taimir", "Siberia"),
    ("Siberia", "Kamchatka"),
    ("Kamchatka", "Japon"),
    // Oceania
    ("Australia", "Sumatra"),
    ("Australia", "Borneo"),
    ("Australia", "Java"),
    // Intercontinental
    ("Brasil", "Sahara"),
    ("Chile", "Australia"),
    ("Colombia", "Mexico"),
    ("Alaska", "Kamchatka"),
    ("Groenlandia", "Islandia"),
    ("Espana", "Sahara"),
    ("Polonia", "Egipto"),
    ("Polonia", "Turquia"),
    ("Rusia", "Turquia"),
    ("Rusia", "Aral"),
    ("Rusia", "Iran"),
    ("Egipto", "Israel"),
    ("Egipto", "Turquia"),
    ("Sumatra", "India"),
    ("Borneo", "Malasia"),
];

/// Build the classic map. Every territory starts unowned with no armies.
///
/// # Errors
///
/// Returns [`TableError`] if the built-in data is inconsistent.
pub fn classic() -> Result<Board, TableError> {
    let mut board = Board::new();
    for (continent, bonus, countries) in CONTINENTS {
        board.add_continent(continent, bonus);
        for country in countries {
            board.add_territory(country, continent)?;
        }
    }
    for (a, b) in BORDERS {
        board.connect(a, b)?;
    }
    Ok(board)
}
