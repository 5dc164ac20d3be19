#[cfg(test)]
mod tests {
    use crate::logic::compute_totals;
    use eventdash_common::{Booking, EventSnapshot};
    use proptest::prelude::*;

    // Whole-number prices keep float sums exact, so reordering can be
    // compared with ==.
    fn arb_booking() -> impl Strategy<Value = Booking> {
        (
            "[a-z0-9]{1,8}",
            prop::option::of(1u32..20),
            prop::option::of(prop::option::of(0u32..5_000)),
        )
            .prop_map(|(id, quantity, event)| Booking {
                id,
                quantity,
                event: event.map(|price| EventSnapshot {
                    price: price.map(f64::from),
                    ..Default::default()
                }),
            })
    }

    proptest! {
        #[test]
        fn test_totals_ignore_order(
            bookings in prop::collection::vec(arb_booking(), 0..30),
            seed in any::<u64>(),
        ) {
            let mut shuffled = bookings.clone();
            // deterministic rotation plus reversal
            if !shuffled.is_empty() {
                let pivot = (seed as usize) % shuffled.len();
                shuffled.rotate_left(pivot);
            }
            if seed % 2 == 0 {
                shuffled.reverse();
            }

            prop_assert_eq!(compute_totals(&bookings), compute_totals(&shuffled));
        }

        #[test]
        fn test_tickets_default_to_one_seat(
            bookings in prop::collection::vec(arb_booking(), 0..30),
        ) {
            let expected: u64 = bookings
                .iter()
                .map(|b| u64::from(b.quantity.unwrap_or(1)))
                .sum();

            prop_assert_eq!(compute_totals(&bookings).total_tickets, expected);
        }

        #[test]
        fn test_totals_split_over_concatenation(
            left in prop::collection::vec(arb_booking(), 0..15),
            right in prop::collection::vec(arb_booking(), 0..15),
        ) {
            let joined: Vec<Booking> = left.iter().chain(right.iter()).cloned().collect();
            let l = compute_totals(&left);
            let r = compute_totals(&right);
            let all = compute_totals(&joined);

            prop_assert_eq!(all.total_tickets, l.total_tickets + r.total_tickets);
            prop_assert_eq!(all.total_cost, l.total_cost + r.total_cost);
        }
    }
}
