use crate::models::MealSlot;
use crate::models::constraints::clamp_meals_per_day;

/// Lower edge of the acceptance band as a fraction of the per-meal target.
pub const ACCEPTANCE_BAND_LOW: f64 = 0.75;

/// Upper edge of the acceptance band as a fraction of the per-meal target.
pub const ACCEPTANCE_BAND_HIGH: f64 = 1.25;

/// Selections per meal id per week before the meal is set aside.
pub const REPETITION_CAP: u32 = 2;

/// Whether grocery lists skip water-only lines by default.
pub const EXCLUDE_WATER: bool = true;

// ─────────────────────────────────────────────────────────────────────────────
// Slot order per meal count
// ─────────────────────────────────────────────────────────────────────────────

pub const SLOTS_THREE: [MealSlot; 3] = [MealSlot::Breakfast, MealSlot::Lunch, MealSlot::Dinner];

pub const SLOTS_FOUR: [MealSlot; 4] = [
    MealSlot::Breakfast,
    MealSlot::Lunch,
    MealSlot::Snack,
    MealSlot::Dinner,
];

pub const SLOTS_FIVE: [MealSlot; 5] = [
    MealSlot::Breakfast,
    MealSlot::Snack,
    MealSlot::Lunch,
    MealSlot::Snack,
    MealSlot::Dinner,
];

/// Slot order for a meal count, clamped to 3..=5 first.
pub fn slot_order(meals_per_day: u8) -> &'static [MealSlot] {
    match clamp_meals_per_day(meals_per_day) {
        3 => &SLOTS_THREE,
        4 => &SLOTS_FOUR,
        _ => &SLOTS_FIVE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_order_lengths() {
        assert_eq!(slot_order(3).len(), 3);
        assert_eq!(slot_order(4)[2], MealSlot::Snack);
        assert_eq!(slot_order(5).len(), 5);
    }

    #[test]
    fn test_slot_order_clamps() {
        assert_eq!(slot_order(0), &SLOTS_THREE);
        assert_eq!(slot_order(2), &SLOTS_THREE);
        assert_eq!(slot_order(12), &SLOTS_FIVE);
    }
}
