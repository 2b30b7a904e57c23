//! Seed data for the genre and price-range master tables.

/// One row of the genre master seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenreSeed {
    pub value: &'static str,
    pub label: &'static str,
    pub display_order: i32,
}

/// One row of the price-range master seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRangeSeed {
    pub value: i16,
    pub label: &'static str,
    pub description: &'static str,
    pub display_order: i32,
}

pub const GENRE_MASTERS: &[GenreSeed] = &[
    GenreSeed { value: "japanese", label: "和食", display_order: 1 },
    GenreSeed { value: "western", label: "洋食", display_order: 2 },
    GenreSeed { value: "chinese", label: "中華", display_order: 3 },
    GenreSeed { value: "italian", label: "イタリアン", display_order: 4 },
    GenreSeed { value: "french", label: "フレンチ", display_order: 5 },
    GenreSeed { value: "cafe", label: "カフェ", display_order: 6 },
    GenreSeed { value: "ramen", label: "ラーメン", display_order: 7 },
    GenreSeed { value: "izakaya", label: "居酒屋", display_order: 8 },
    GenreSeed { value: "other", label: "その他", display_order: 9 },
];

pub const PRICE_RANGE_MASTERS: &[PriceRangeSeed] = &[
    PriceRangeSeed {
        value: 1,
        label: "¥（〜999円）",
        description: "1,000円未満",
        display_order: 1,
    },
    PriceRangeSeed {
        value: 2,
        label: "¥¥（1,000〜2,999円）",
        description: "1,000円〜2,999円",
        display_order: 2,
    },
    PriceRangeSeed {
        value: 3,
        label: "¥¥¥（3,000円〜）",
        description: "3,000円以上",
        display_order: 3,
    },
];
