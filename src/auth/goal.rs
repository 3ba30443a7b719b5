//! Daily calorie goal computation (Mifflin-St Jeor).

/// Basal metabolic rate. Any gender other than "male" gets the female offset.
pub fn bmr(weight_kg: f64, height_cm: f64, age: i32, gender: &str) -> f64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age);
    if gender == "male" {
        base + 5.0
    } else {
        base - 161.0
    }
}

/// TDEE multiplier per activity tier; unknown tiers fall back to sedentary.
pub fn activity_multiplier(activity_level: &str) -> f64 {
    match activity_level {
        "sedentary" => 1.2,
        "lightly_active" => 1.375,
        "moderately_active" => 1.55,
        "very_active" => 1.725,
        "extra_active" => 1.9,
        _ => 1.2,
    }
}

/// Total daily energy expenditure, rounded to the nearest calorie.
pub fn daily_calorie_goal(
    weight_kg: f64,
    height_cm: f64,
    age: i32,
    gender: &str,
    activity_level: &str,
) -> i32 {
    (bmr(weight_kg, height_cm, age, gender) * activity_multiplier(activity_level)).round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bmr_male_example() {
        // 10*70 + 6.25*175 - 5*25 + 5 = 1673.75
        assert_eq!(bmr(70.0, 175.0, 25, "male"), 1673.75);
    }

    #[test]
    fn bmr_female_offset() {
        // 10*60 + 6.25*165 - 5*30 - 161 = 1320.25
        assert_eq!(bmr(60.0, 165.0, 30, "female"), 1320.25);
    }

    #[test]
    fn tdee_moderately_active_male() {
        // round(1673.75 * 1.55) = 2594
        assert_eq!(
            daily_calorie_goal(70.0, 175.0, 25, "male", "moderately_active"),
            2594
        );
    }

    #[test]
    fn tdee_all_tiers_are_monotonic() {
        let tiers = [
            "sedentary",
            "lightly_active",
            "moderately_active",
            "very_active",
            "extra_active",
        ];
        let goals: Vec<i32> = tiers
            .iter()
            .map(|t| daily_calorie_goal(70.0, 175.0, 25, "male", t))
            .collect();
        for pair in goals.windows(2) {
            assert!(pair[0] < pair[1], "goals should increase with activity");
        }
    }

    #[test]
    fn unknown_activity_defaults_to_sedentary() {
        assert_eq!(activity_multiplier("astronaut"), 1.2);
        assert_eq!(
            daily_calorie_goal(70.0, 175.0, 25, "male", "astronaut"),
            daily_calorie_goal(70.0, 175.0, 25, "male", "sedentary"),
        );
    }
}
