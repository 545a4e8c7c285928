// Tax tables - regressive income tax (IR) and IOF on fixed-income redemptions

use rust_decimal::Decimal;

use super::InstrumentKind;

/// One row of a day-indexed tax table.
///
/// A bracket covers `from_day..=to_day`; the last bracket of a table is
/// open-ended (`to_day == None`). Rates are fractions (0.225 = 22.5%).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxBracket {
    pub from_day: u32,
    pub to_day: Option<u32>,
    pub rate: Decimal,
}

impl TaxBracket {
    pub fn contains(&self, day: u32) -> bool {
        day >= self.from_day && self.to_day.map_or(true, |end| day <= end)
    }
}

/// Regressive IR table: (last day of bracket, rate in basis points)
const INCOME_TAX_TABLE: [(Option<u32>, i64); 4] = [
    (Some(180), 2250),
    (Some(360), 2000),
    (Some(720), 1750),
    (None, 1500),
];

/// IOF percentage by elapsed day (index = day). Day 30 onwards is exempt.
const IOF_DAILY_PCT: [i64; 30] = [
    96, 96, 93, 90, 86, 83, 80, 76, 73, 70, 66, 63, 60, 56, 53, 50, 46, 43, 40, 36, 33, 30, 26,
    23, 20, 16, 13, 10, 6, 3,
];

/// First day on which IOF no longer applies
pub const IOF_EXEMPT_FROM_DAY: u32 = 30;

/// Income tax brackets, ordered and contiguous from day 0.
pub fn income_tax_brackets() -> Vec<TaxBracket> {
    let mut from_day = 0;
    INCOME_TAX_TABLE
        .iter()
        .map(|&(to_day, bps)| {
            let bracket = TaxBracket {
                from_day,
                to_day,
                rate: Decimal::new(bps, 4),
            };
            from_day = to_day.map_or(from_day, |d| d + 1);
            bracket
        })
        .collect()
}

/// IOF brackets: one per day below 30, then a zero-rate open bracket.
pub fn iof_brackets() -> Vec<TaxBracket> {
    let mut brackets: Vec<TaxBracket> = IOF_DAILY_PCT
        .iter()
        .enumerate()
        .map(|(day, &pct)| TaxBracket {
            from_day: day as u32,
            to_day: Some(day as u32),
            rate: Decimal::new(pct, 2),
        })
        .collect();
    brackets.push(TaxBracket {
        from_day: IOF_EXEMPT_FROM_DAY,
        to_day: None,
        rate: Decimal::ZERO,
    });
    brackets
}

fn lookup(brackets: &[TaxBracket], day: u32) -> Decimal {
    brackets
        .iter()
        .find(|b| b.contains(day))
        .map(|b| b.rate)
        .unwrap_or(Decimal::ZERO)
}

/// IR rate for a holding period, ignoring instrument exemptions.
///
/// The bracket in effect at `days_elapsed` applies to the whole gain; there is
/// no pro-rating across brackets.
pub fn lookup_income_tax_rate(days_elapsed: u32) -> Decimal {
    lookup(&income_tax_brackets(), days_elapsed)
}

/// IOF rate for a holding period, ignoring instrument exemptions.
pub fn lookup_iof_rate(days_elapsed: u32) -> Decimal {
    if days_elapsed >= IOF_EXEMPT_FROM_DAY {
        return Decimal::ZERO;
    }
    IOF_DAILY_PCT
        .get(days_elapsed as usize)
        .map(|&pct| Decimal::new(pct, 2))
        .unwrap_or(Decimal::ZERO)
}

/// IR rate after the instrument-level override (LCI/LCA are exempt).
pub fn income_tax_rate_for(kind: InstrumentKind, days_elapsed: u32) -> Decimal {
    if kind.is_tax_exempt() {
        Decimal::ZERO
    } else {
        lookup_income_tax_rate(days_elapsed)
    }
}

/// IOF rate after the instrument-level override.
pub fn iof_rate_for(kind: InstrumentKind, days_elapsed: u32) -> Decimal {
    if kind.is_tax_exempt() {
        Decimal::ZERO
    } else {
        lookup_iof_rate(days_elapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn assert_contiguous(brackets: &[TaxBracket]) {
        assert_eq!(brackets.first().map(|b| b.from_day), Some(0));
        for pair in brackets.windows(2) {
            let end = pair[0].to_day.expect("only the last bracket is open-ended");
            assert_eq!(pair[1].from_day, end + 1);
        }
        assert!(brackets.last().unwrap().to_day.is_none());
    }

    #[test]
    fn test_brackets_cover_all_days() {
        assert_contiguous(&income_tax_brackets());
        assert_contiguous(&iof_brackets());
    }

    #[test]
    fn test_income_tax_boundaries() {
        assert_eq!(lookup_income_tax_rate(1), dec!(0.225));
        assert_eq!(lookup_income_tax_rate(180), dec!(0.225));
        assert_eq!(lookup_income_tax_rate(181), dec!(0.20));
        assert_eq!(lookup_income_tax_rate(360), dec!(0.20));
        assert_eq!(lookup_income_tax_rate(361), dec!(0.175));
        assert_eq!(lookup_income_tax_rate(720), dec!(0.175));
        assert_eq!(lookup_income_tax_rate(721), dec!(0.15));
        assert_eq!(lookup_income_tax_rate(10_000), dec!(0.15));
    }

    #[test]
    fn test_iof_decay() {
        assert_eq!(lookup_iof_rate(1), dec!(0.96));
        assert_eq!(lookup_iof_rate(2), dec!(0.93));
        assert_eq!(lookup_iof_rate(15), dec!(0.50));
        assert_eq!(lookup_iof_rate(29), dec!(0.03));
        assert_eq!(lookup_iof_rate(30), Decimal::ZERO);
        assert_eq!(lookup_iof_rate(365), Decimal::ZERO);

        // strictly non-increasing over the window
        let rates: Vec<Decimal> = (0..=30).map(lookup_iof_rate).collect();
        assert!(rates.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_iof_table_agrees_with_brackets() {
        let brackets = iof_brackets();
        for day in 0..40 {
            assert_eq!(lookup(&brackets, day), lookup_iof_rate(day), "day {}", day);
        }
    }

    #[test]
    fn test_exempt_instruments_override_tables() {
        for kind in [InstrumentKind::Lci, InstrumentKind::Lca] {
            assert_eq!(income_tax_rate_for(kind, 10), Decimal::ZERO);
            assert_eq!(iof_rate_for(kind, 10), Decimal::ZERO);
        }
        assert_eq!(income_tax_rate_for(InstrumentKind::Cdb, 10), dec!(0.225));
        assert_eq!(iof_rate_for(InstrumentKind::Cdb, 10), dec!(0.66));
    }
}
