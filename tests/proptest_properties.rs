//! Property tests for color blending, totals and gradient resolution.

use invoice_engine::color::{self, Rgb, parse_hex};
use invoice_engine::pricing::{grand_total, subtotal};
use invoice_engine::{GradientCatalog, LineItem};
use proptest::prelude::*;

fn hex_strategy() -> impl Strategy<Value = String> {
    "#[0-9A-Fa-f]{6}"
}

fn items_strategy() -> impl Strategy<Value = Vec<LineItem>> {
    // integer-valued amounts keep the float sums exact
    prop::collection::vec((0u32..1_000, 0u32..100_000), 0..16).prop_map(|pairs| {
        pairs
            .into_iter()
            .enumerate()
            .map(|(i, (q, p))| LineItem::with_id(i.to_string(), "", f64::from(q), f64::from(p)))
            .collect()
    })
}

fn any_ratio() -> impl Strategy<Value = f64> {
    prop_oneof![
        0.0f64..=1.0,
        -1.0e6f64..1.0e6,
        Just(f64::NAN),
        Just(f64::INFINITY),
        Just(f64::NEG_INFINITY),
    ]
}

proptest! {
    #[test]
    fn hex_round_trips_uppercased(s in hex_strategy()) {
        let rgb = parse_hex(&s).unwrap();
        prop_assert_eq!(Rgb::to_hex(rgb), s.to_uppercase());
    }

    #[test]
    fn mixing_with_itself_is_identity(s in hex_strategy(), ratio in any_ratio()) {
        prop_assert_eq!(color::mix(&s, &s, ratio), s.to_uppercase());
    }

    #[test]
    fn mix_endpoints(a in hex_strategy(), b in hex_strategy()) {
        prop_assert_eq!(color::mix(&a, &b, 0.0), a.to_uppercase());
        prop_assert_eq!(color::mix(&a, &b, 1.0), b.to_uppercase());
    }

    #[test]
    fn subtotal_ignores_order(items in items_strategy()) {
        let mut reversed = items.clone();
        reversed.reverse();
        prop_assert_eq!(subtotal(&items), subtotal(&reversed));
    }

    #[test]
    fn zero_adjustments_keep_subtotal(sub in -1.0e9f64..1.0e9) {
        prop_assert_eq!(grand_total(sub, Some(0.0), Some(0.0)), sub);
        prop_assert_eq!(grand_total(sub, None, None), sub);
    }

    #[test]
    fn unknown_gradient_ids_resolve_to_sunrise(id in "[a-z-]{0,12}") {
        let catalog = GradientCatalog::builtin();
        let resolved = catalog.resolve(Some(&id));
        if catalog.contains(&id) {
            prop_assert_eq!(resolved.id, id.as_str());
        } else {
            prop_assert_eq!(resolved.id, "sunrise");
        }
    }
}

#[test]
fn discount_beyond_subtotal_goes_negative() {
    assert_eq!(grand_total(100.0, Some(150.0), Some(0.0)), -50.0);
}
