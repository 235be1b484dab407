//! Links every listed reservation to the one booked right before it on the
//! same rental.

use crate::model::{
    id::{RentalId, ReservationId},
    reservation::{RentalReservation, ReservationEntry},
};

/// Annotates reservations with their predecessor in a single pass.
///
/// The input must already be ordered by rental, then by checkout (ties by
/// id); the ordering is the query's job and is not re-checked here. The
/// output has one entry per input row, in the same order. An entry points at
/// the row before it when both rows belong to the same rental, and at
/// nothing when the rental changes or at the start of the sequence.
pub fn link_previous<I>(reservations: I) -> Vec<ReservationEntry>
where
    I: IntoIterator<Item = RentalReservation>,
{
    let mut last: Option<(RentalId, ReservationId)> = None;
    reservations
        .into_iter()
        .map(|reservation| {
            let previous_reservation = match last {
                Some((rental_id, id)) if rental_id == reservation.rental_id => Some(id),
                _ => None,
            };
            last = Some((reservation.rental_id, reservation.id));
            ReservationEntry {
                reservation,
                previous_reservation,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: i64, rental_id: i64, rental_name: &str, checkin: &str, checkout: &str) -> RentalReservation {
        RentalReservation {
            id: ReservationId::new(id),
            rental_id: RentalId::new(rental_id),
            rental_name: rental_name.into(),
            checkin: checkin.parse().unwrap(),
            checkout: checkout.parse().unwrap(),
        }
    }

    fn sample() -> Vec<RentalReservation> {
        vec![
            row(1, 1, "rental-1", "2022-01-01", "2022-01-13"),
            row(2, 1, "rental-1", "2022-01-20", "2022-02-10"),
            row(3, 1, "rental-1", "2022-02-20", "2022-03-10"),
            row(4, 2, "rental-2", "2022-01-02", "2022-01-20"),
            row(5, 2, "rental-2", "2022-01-20", "2022-02-11"),
        ]
    }

    fn previous_ids(entries: &[ReservationEntry]) -> Vec<Option<i64>> {
        entries
            .iter()
            .map(|e| e.previous_reservation.map(ReservationId::raw))
            .collect()
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(link_previous(Vec::new()).is_empty());
    }

    #[test]
    fn single_rental_chains_in_checkout_order() {
        let entries = link_previous(sample().into_iter().take(3));
        assert_eq!(previous_ids(&entries), vec![None, Some(1), Some(2)]);
    }

    #[test]
    fn rental_change_resets_the_chain() {
        let entries = link_previous(sample());
        assert_eq!(
            previous_ids(&entries),
            vec![None, Some(1), Some(2), None, Some(4)]
        );
    }

    #[test]
    fn output_keeps_input_order_and_rows() {
        let input = sample();
        let entries = link_previous(input.clone());
        let rows: Vec<_> = entries.into_iter().map(|e| e.reservation).collect();
        assert_eq!(rows, input);
    }

    #[test]
    fn running_twice_gives_identical_output() {
        assert_eq!(link_previous(sample()), link_previous(sample()));
    }

    #[test]
    fn equal_checkouts_follow_the_given_order() {
        let entries = link_previous(vec![
            row(7, 3, "loft", "2022-05-01", "2022-05-01"),
            row(9, 3, "loft", "2022-05-01", "2022-05-01"),
        ]);
        assert_eq!(previous_ids(&entries), vec![None, Some(7)]);
    }
}
