//! スコアリングの性質テスト
//!
//! 「指定なしは常に満点」「マッチ率は必ず重み付き合計」などの
//! 不変条件を、代表値の総当たりで検証する。

use menu_ai_rust::drink::{CandidateDrink, FieldScores};
use menu_ai_rust::normalizer::Dimension;
use menu_ai_rust::preference::Preference;
use menu_ai_rust::scorer::{
    aggregate, revalidate_scores, score_drink, score_field, WeightTable,
};

fn drink_with(dimension: Dimension, value: &str) -> CandidateDrink {
    let mut drink = CandidateDrink {
        name: "Test".into(),
        ..Default::default()
    };
    let value = Some(value.to_string());
    match dimension {
        Dimension::AlcoholType => drink.alcohol_type = value,
        Dimension::Strength => drink.strength = value,
        Dimension::Glassware => drink.glassware = value,
        Dimension::Acidity => drink.acidity = value,
        Dimension::Sweetness => drink.sweetness = value,
        Dimension::Bitterness => drink.bitterness = value,
        Dimension::Spice => drink.spice = value,
    }
    drink
}

/// 指定なしは、ドリンク側がどんな値でも満点（don't-care dominance）
#[test]
fn test_dont_care_dominance_across_all_dimensions() {
    let weights = WeightTable::default();
    let drink_values = [
        "Whiskey", "Highball", "Very strong", "High", "Dry", "Yes", "謎の値", "",
    ];

    for dimension in Dimension::ALL {
        let weight = weights.weight(dimension);
        for drink_value in drink_values {
            let drink = drink_with(dimension, drink_value);
            for pref in [None, Some("Any"), Some("NA"), Some("  ")] {
                let outcome = score_field(dimension, pref, &drink, weight);
                assert_eq!(
                    outcome.score, weight as i64,
                    "dimension={} pref={:?} drink={:?}",
                    dimension, pref, drink_value
                );
            }
        }
    }
}

/// どんなスコア組み合わせでも重み付き合計は100を超えない
#[test]
fn test_score_sum_never_exceeds_100() {
    let weights = WeightTable::default();
    let preference = Preference {
        alcohol_type: Some("Whiskey".into()),
        strength: Some("Very strong".into()),
        glassware: Some("Highball".into()),
        acidity: Some("Low".into()),
        sweetness: Some("Medium".into()),
        bitterness: Some("Medium".into()),
        spice: Some("No".into()),
    };

    let candidates = [
        CandidateDrink {
            name: "Perfect".into(),
            alcohol_type: Some("Whiskey".into()),
            strength: Some("Very strong".into()),
            glassware: Some("Highball".into()),
            acidity: Some("Low".into()),
            sweetness: Some("Medium".into()),
            bitterness: Some("Medium".into()),
            spice: Some("No".into()),
            ..Default::default()
        },
        CandidateDrink {
            name: "Opposite".into(),
            alcohol_type: Some("Beer".into()),
            strength: Some("Low".into()),
            glassware: Some("Mug".into()),
            acidity: Some("High".into()),
            sweetness: Some("High".into()),
            bitterness: Some("High".into()),
            spice: Some("Yes".into()),
            ..Default::default()
        },
        CandidateDrink {
            name: "Sparse".into(),
            ingredients: vec!["lime".into(), "cream".into(), "dry vermouth".into()],
            ..Default::default()
        },
    ];

    for drink in candidates {
        let (scores, _) = score_drink(&preference, &drink, &weights);
        let pct = aggregate(&scores);
        assert!(pct >= 0.0 && pct <= 100.0, "{}: {}", drink.name, pct);
        assert_eq!(pct, scores.total() as f64, "{}", drink.name);
    }
}

/// 完全一致ドリンクはちょうど100.0
#[test]
fn test_perfect_match_is_exactly_100() {
    let weights = WeightTable::default();
    let preference = Preference {
        alcohol_type: Some("Gin".into()),
        strength: Some("Strong".into()),
        glassware: Some("Coupe".into()),
        acidity: Some("High".into()),
        sweetness: Some("Low".into()),
        bitterness: Some("Low".into()),
        spice: Some("No".into()),
    };
    let drink = CandidateDrink {
        name: "Exact".into(),
        alcohol_type: Some("gin".into()),
        strength: Some("high".into()), // "high" は Strong の別表記
        glassware: Some("coupe glass".into()),
        acidity: Some("high".into()),
        sweetness: Some("light".into()),
        bitterness: Some("mild".into()),
        spice: Some("none".into()),
        ..Default::default()
    };

    let (scores, assumptions) = score_drink(&preference, &drink, &weights);
    assert_eq!(aggregate(&scores), 100.0);
    assert!(assumptions.is_none());
}

/// 検証パスは冪等: 妥当なスコアの再検証は恒等変換
#[test]
fn test_revalidation_is_noop_on_valid_scores() {
    let weights = WeightTable::default();
    let preference = Preference {
        alcohol_type: Some("Rum".into()),
        sweetness: Some("High".into()),
        ..Default::default()
    };
    let drink = CandidateDrink {
        name: "Piña Colada".into(),
        alcohol_type: Some("Rum".into()),
        ingredients: vec!["rum".into(), "coconut cream".into(), "pineapple".into()],
        ..Default::default()
    };

    let (scores, _) = score_drink(&preference, &drink, &weights);
    let once = revalidate_scores(&scores, &weights);
    let twice = revalidate_scores(&once, &weights);
    assert_eq!(scores, once);
    assert_eq!(once, twice);
}

/// spec記載のManhattanシナリオ: 合計は重み表の算術そのもの
#[test]
fn test_manhattan_scenario_end_to_end() {
    let weights = WeightTable::default();
    let preference = Preference {
        alcohol_type: Some("Whiskey".into()),
        strength: Some("Very strong".into()),
        glassware: Some("Highball".into()),
        acidity: Some("Low".into()),
        sweetness: Some("Medium".into()),
        bitterness: Some("Medium".into()),
        spice: Some("No".into()),
    };
    let manhattan = CandidateDrink {
        name: "Manhattan".into(),
        alcohol_type: Some("Whiskey".into()),
        strength: Some("Very strong".into()),
        glassware: Some("Martini".into()),
        acidity: Some("Low".into()),
        sweetness: Some("Low".into()),
        bitterness: Some("Medium".into()),
        spice: Some("No".into()),
        ..Default::default()
    };

    let (scores, _) = score_drink(&preference, &manhattan, &weights);
    let expected = FieldScores {
        alcohol_type: 40,
        strength: 20,
        glassware: 0, // Martini は Highball/Collins クラス外
        acidity: 10,
        sweetness: 4, // Medium↔Low 隣接で半分
        bitterness: 8,
        spice: 4,
    };
    assert_eq!(scores, expected);
    assert_eq!(aggregate(&scores), 86.0);
}

/// 材料推定は半分クレジット + メモ
#[test]
fn test_inference_awards_half_with_note() {
    let weights = WeightTable::default();
    let preference = Preference {
        acidity: Some("High".into()),
        sweetness: Some("Dry".into()),
        ..Default::default()
    };
    let martini = CandidateDrink {
        name: "Dry Martini".into(),
        ingredients: vec!["gin".into(), "dry vermouth".into(), "lemon twist".into()],
        ..Default::default()
    };

    let (scores, assumptions) = score_drink(&preference, &martini, &weights);
    assert_eq!(scores.acidity, 5); // lemon → High 推定で半分
    assert_eq!(scores.sweetness, 4); // dry vermouth → Dry 推定で半分

    let notes = assumptions.expect("推定メモが残るべき");
    assert!(notes.contains("acidity"));
    assert!(notes.contains("sweetness"));
}
