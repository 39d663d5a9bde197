//! Base-material descriptions for the alloys samples are printed from.

use super::pif::{Alloy, Composition, Reference, Scalar};
use super::steps::StepList;

/// Nominal Inconel 718 composition in weight percent, minus the balance element.
static INCONEL718_COMPOSITION: [(&str, f64, f64); 14] = [
    ("Ni", 50.0, 55.0),
    ("Cr", 17.0, 21.0),
    ("Nb", 4.75, 5.5),
    ("Mo", 2.8, 3.3),
    ("Ti", 0.65, 1.15),
    ("Al", 0.2, 0.8),
    ("Co", 0.0, 1.0),
    ("C", 0.0, 0.08),
    ("Mn", 0.0, 0.35),
    ("Si", 0.0, 0.35),
    ("P", 0.0, 0.015),
    ("S", 0.0, 0.015),
    ("B", 0.0, 0.006),
    ("Cu", 0.0, 0.30),
];

const INCONEL718_DATASHEET: &str =
    "http://www.specialmetals.com/documents/Inconel%20alloy%20718.pdf";

impl Alloy {
    /// The Inconel 718 description embedded in every sample record.
    ///
    /// Iron is the balance element: its bounds absorb whatever the other
    /// elements leave of 100 weight percent, so the composition minimums sum
    /// to at most 100 and the maximums to at least 100.
    pub fn inconel718() -> Self {
        let mut balance_low = 100.0;
        let mut balance_high = 100.0;
        let mut composition = Vec::with_capacity(INCONEL718_COMPOSITION.len() + 1);
        for (element, low, high) in INCONEL718_COMPOSITION.iter() {
            balance_low -= high;
            balance_high -= low;
            composition.push(Composition {
                element: element.to_string(),
                ideal_weight_percent: Scalar::range(*low, *high),
            });
        }
        debug_assert!(balance_low >= 0.0);
        debug_assert!(balance_high >= 0.0);
        composition.push(Composition {
            element: String::from("Fe"),
            ideal_weight_percent: Scalar::range(balance_low, balance_high),
        });

        Alloy {
            names: [
                "Inconel",
                "Inconel 718",
                "718",
                "UNS N07718",
                "W.Nr. 2.4668",
                "AMS 5596",
                "ASTM B637",
            ]
            .iter()
            .map(|name| name.to_string())
            .collect(),
            references: vec![Reference {
                url: String::from(INCONEL718_DATASHEET),
            }],
            composition,
            preparation: StepList::new(),
        }
    }
}
