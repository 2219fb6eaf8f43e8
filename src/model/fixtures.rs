//! Canned analysis responses shared by unit tests

use super::ReportDataModel;

/// A complete successful response with every optional section populated
pub const RESPONSE_JSON: &str = r#"{
    "success": true,
    "name": "Asha Rao",
    "date_of_birth": "1992-05-14",
    "gender": "female",
    "driver": 5,
    "conductor": 4,
    "kua": 8,
    "loshu_grid": [
        [{"value": "44", "present": true, "count": 2}, {"value": "99", "present": true, "count": 2}, {"value": "2", "present": true, "count": 1}],
        [{"value": 3, "present": false, "count": 0}, {"value": "55", "present": true, "count": 2}, {"value": 7, "present": false, "count": 0}],
        [{"value": 8, "present": false, "count": 0}, {"value": "11", "present": true, "count": 2}, {"value": 6, "present": false, "count": 0}]
    ],
    "present_numbers": [1, 2, 4, 5, 9],
    "missing_numbers": [3, 6, 7, 8],
    "loshu_lines": {
        "horizontal": [{"numbers": [4, 9, 2], "name": "Mental Plane", "description": "Sharp intellect and strong memory.", "type": "horizontal"}],
        "vertical": [{"numbers": [9, 5, 1], "name": "Determination Line", "description": "Persistence in reaching goals.", "type": "vertical"}],
        "diagonal": [],
        "all": [
            {"numbers": [4, 9, 2], "name": "Mental Plane", "description": "Sharp intellect and strong memory.", "type": "horizontal"},
            {"numbers": [9, 5, 1], "name": "Determination Line", "description": "Persistence in reaching goals.", "type": "vertical"}
        ]
    },
    "driver_compatibility": {"planet": "Mercury (Budh)", "friends_raw": "1, 2, 3, 6", "non_friends_raw": "--------", "neutral_raw": "4, 5, 7, 8, 9", "friends": [1, 2, 3, 6], "non_friends": [], "neutral": [4, 5, 7, 8, 9]},
    "conductor_compatibility": {"planet": "Rahu", "friends_raw": "1, 5, 6, 7", "non_friends_raw": "2, 9", "neutral_raw": "3, 4, 8"},
    "lucky_numbers": [1, 5, 6],
    "bad_numbers": [2, 9],
    "neutral_numbers": [3, 4, 7, 8],
    "remedies_part1": [
        {"condition": "3 is missing", "remedy": "Keep a yellow handkerchief with you and respect your teachers and elders. Apply a tilak of turmeric or saffron on the forehead every Thursday morning before leaving the house."},
        {"condition": "If 8 is missing", "remedy": "Feed crows on Saturdays."}
    ],
    "remedies_part2": [
        {"condition": "6 and 7 are both missing", "remedy": "Install a Shukra Yantra"}
    ],
    "remedies_part3": [
        {"number": 3, "planet": "Jupiter", "remedies": ["Wear yellow on Thursdays", "Donate turmeric"]},
        {"number": 6, "planet": "Venus", "remedies": ["Use a silver glass for water"]}
    ],
    "luck_factors": [
        {"year": 2026, "date": "14/05/2026", "personal_year": 5, "driver": 5, "combination": "5,5", "luck_factor": "Excellent"},
        {"year": 2027, "date": "14/05/2027", "personal_year": 6, "driver": 5, "combination": "6,5", "luck_factor": "Good"},
        {"year": 2028, "date": "14/05/2028", "personal_year": 7, "driver": 5, "combination": "7,5", "luck_factor": "Average"}
    ],
    "name_analysis": {
        "first_name": "Asha",
        "first_name_value": 1,
        "first_name_breakdown": {"breakdown": [
            {"letter": "A", "value": 1}, {"letter": "S", "value": 3}, {"letter": "H", "value": 5}, {"letter": "A", "value": 1}
        ], "raw_total": 10, "final_value": 1},
        "full_name": "Asha Rao",
        "full_name_value": 2,
        "full_name_breakdown": {"breakdown": [
            {"letter": "A", "value": 1}, {"letter": "S", "value": 3}, {"letter": "H", "value": 5}, {"letter": "A", "value": 1},
            {"letter": " ", "value": "-"},
            {"letter": "R", "value": 2}, {"letter": "A", "value": 1}, {"letter": "O", "value": 7}
        ], "raw_total": 20, "final_value": 2},
        "followed_rules": [
            {"rule": "Rule 1", "description": "First name value is friendly to the driver number.", "status": "good"}
        ],
        "contradicted_rules": [
            {"rule": "Rule 4", "description": "Full name value is hostile to the conductor number.", "status": "bad"},
            {"rule": "Rule 6", "description": "Consider adding a letter to the surname.", "status": "suggestion"}
        ],
        "overall_status": "warning"
    }
}"#;

/// A successful response with every optional section empty or absent
pub const SPARSE_RESPONSE_JSON: &str = r#"{
    "success": true,
    "name": "Ben",
    "date_of_birth": "2000-01-01",
    "gender": "male",
    "driver": 1,
    "conductor": 4,
    "kua": 9,
    "loshu_grid": [
        [{"value": 4, "present": false, "count": 0}, {"value": 9, "present": false, "count": 0}, {"value": "2", "present": true, "count": 1}],
        [{"value": 3, "present": false, "count": 0}, {"value": 5, "present": false, "count": 0}, {"value": 7, "present": false, "count": 0}],
        [{"value": 8, "present": false, "count": 0}, {"value": "111", "present": true, "count": 3}, {"value": 6, "present": false, "count": 0}]
    ],
    "present_numbers": [1, 2],
    "missing_numbers": [3, 4, 5, 6, 7, 8, 9],
    "loshu_lines": {"horizontal": [], "vertical": [], "diagonal": [], "all": []},
    "driver_compatibility": {},
    "conductor_compatibility": {},
    "lucky_numbers": [],
    "bad_numbers": [],
    "neutral_numbers": [],
    "remedies_part1": [],
    "remedies_part2": [],
    "remedies_part3": [],
    "luck_factors": [],
    "name_analysis": null
}"#;

pub fn model() -> ReportDataModel {
    ReportDataModel::from_response(RESPONSE_JSON).expect("fixture response parses")
}

pub fn sparse_model() -> ReportDataModel {
    ReportDataModel::from_response(SPARSE_RESPONSE_JSON).expect("sparse fixture parses")
}
