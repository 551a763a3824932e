//! WHOOP sport ids.
//!
//! Workouts report the activity as a numeric `sport_id`. The table below maps the ids
//! WHOOP documents to their display names. It is sorted by id.

/// Known sports, sorted by id
pub const SPORTS: &[(i32, &str)] = &[
    (-1, "Activity"),
    (0, "Running"),
    (1, "Cycling"),
    (16, "Baseball"),
    (17, "Basketball"),
    (18, "Rowing"),
    (19, "Fencing"),
    (20, "Field Hockey"),
    (21, "Football"),
    (22, "Golf"),
    (24, "Ice Hockey"),
    (25, "Lacrosse"),
    (27, "Rugby"),
    (28, "Sailing"),
    (29, "Skiing"),
    (30, "Soccer"),
    (31, "Softball"),
    (32, "Squash"),
    (33, "Swimming"),
    (34, "Tennis"),
    (35, "Track & Field"),
    (36, "Volleyball"),
    (37, "Water Polo"),
    (38, "Wrestling"),
    (39, "Boxing"),
    (42, "Dance"),
    (43, "Pilates"),
    (44, "Yoga"),
    (45, "Weightlifting"),
    (47, "Cross Country Skiing"),
    (48, "Functional Fitness"),
    (49, "Duathlon"),
    (51, "Gymnastics"),
    (52, "Hiking/Rucking"),
    (53, "Horseback Riding"),
    (55, "Kayaking"),
    (56, "Martial Arts"),
    (57, "Mountain Biking"),
    (59, "Powerlifting"),
    (60, "Rock Climbing"),
    (61, "Paddleboarding"),
    (62, "Triathlon"),
    (63, "Walking"),
    (64, "Surfing"),
    (65, "Elliptical"),
    (66, "Stairmaster"),
    (70, "Meditation"),
    (71, "Other"),
    (73, "Diving"),
    (74, "Operations - Tactical"),
    (75, "Operations - Medical"),
    (76, "Operations - Flying"),
    (77, "Operations - Water"),
    (82, "Ultimate"),
    (83, "Climber"),
    (84, "Jumping Rope"),
    (85, "Australian Football"),
    (86, "Skateboarding"),
    (87, "Coaching"),
    (88, "Ice Bath"),
    (89, "Commuting"),
    (90, "Gaming"),
    (91, "Snowboarding"),
    (92, "Motocross"),
    (93, "Caddying"),
    (94, "Obstacle Course Racing"),
    (95, "Motor Racing"),
    (96, "HIIT"),
    (97, "Spin"),
    (98, "Jiu Jitsu"),
    (99, "Manual Labor"),
    (100, "Cricket"),
    (101, "Pickleball"),
    (102, "Inline Skating"),
    (103, "Box Fitness"),
    (104, "Spikeball"),
    (105, "Wheelchair Pushing"),
    (106, "Paddle Tennis"),
    (107, "Barre"),
    (108, "Stage Performance"),
    (109, "High Stress Work"),
    (110, "Parkour"),
    (111, "Gaelic Football"),
    (112, "Hurling/Camogie"),
    (113, "Circus Arts"),
    (121, "Massage Therapy"),
    (125, "Watching Sports"),
    (126, "Assault Bike"),
    (127, "Kickboxing"),
    (128, "Stretching"),
];

/// Returns the display name for a sport id, or `None` if the id is not known.
pub fn sport_name(sport_id: i32) -> Option<&'static str> {
    SPORTS
        .binary_search_by_key(&sport_id, |(id, _)| *id)
        .ok()
        .map(|index| SPORTS[index].1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_sorted() {
        assert!(SPORTS.windows(2).all(|pair| pair[0].0 < pair[1].0));
    }

    #[test]
    fn test_sport_name() {
        assert_eq!(sport_name(27), Some("Rugby"));
        assert_eq!(sport_name(128), Some("Stretching"));
        assert_eq!(sport_name(-1), Some("Activity"));
        assert_eq!(sport_name(0), Some("Running"));
        assert_eq!(sport_name(2), None);
        assert_eq!(sport_name(9999), None);
    }
}
