//! Proportional redistribution of income across variable expense categories.
//!
//! Fixed expense categories consume income first; whatever remains is split
//! between the variable expense categories in proportion to their weights.
//! Savings are never allocated here — they are the remainder left after all
//! expenses.

use rust_decimal::Decimal;

use crate::constants::AMOUNT_DECIMAL_PLACES;

use super::budgets_model::BudgetCategory;

/// Sum of planned amounts over fixed expense categories.
pub fn total_fixed_planned(categories: &[BudgetCategory]) -> Decimal {
    categories
        .iter()
        .filter(|c| c.is_fixed_expense())
        .map(|c| c.planned_amount)
        .sum()
}

/// Sum of planned amounts over variable expense categories.
pub fn total_variable_planned(categories: &[BudgetCategory]) -> Decimal {
    categories
        .iter()
        .filter(|c| c.is_variable_expense())
        .map(|c| c.planned_amount)
        .sum()
}

/// Computes new planned amounts for every variable expense category.
///
/// Returns `(category_id, planned_amount)` pairs, or an empty list when the
/// total proportion is zero (nothing to split; avoids a division by zero) so
/// the caller can skip the write entirely. The computation reads only its
/// inputs, which makes repeated application idempotent.
pub fn redistribute(
    total_income: Decimal,
    categories: &[BudgetCategory],
) -> Vec<(String, Decimal)> {
    let available = (total_income - total_fixed_planned(categories)).max(Decimal::ZERO);

    let variable: Vec<(&BudgetCategory, Decimal)> = categories
        .iter()
        .filter(|c| c.is_variable_expense())
        .filter_map(|c| c.allocation.proportion().map(|p| (c, p)))
        .collect();

    let total_proportion: Decimal = variable.iter().map(|(_, p)| *p).sum();
    if total_proportion.is_zero() {
        return Vec::new();
    }

    variable
        .into_iter()
        .map(|(category, proportion)| {
            let amount = (available * proportion / total_proportion)
                .round_dp(AMOUNT_DECIMAL_PLACES)
                .max(Decimal::ZERO);
            (category.id.clone(), amount)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budgets::budgets_model::{Allocation, CategoryType};
    use chrono::NaiveDateTime;
    use rust_decimal_macros::dec;

    fn category(
        id: &str,
        planned: Decimal,
        category_type: CategoryType,
        allocation: Allocation,
    ) -> BudgetCategory {
        BudgetCategory {
            id: id.to_string(),
            name: id.to_string(),
            planned_amount: planned,
            category_type,
            allocation,
            color: None,
            is_permanent: false,
            created_at: NaiveDateTime::default(),
        }
    }

    fn fixed_expense(id: &str, planned: Decimal) -> BudgetCategory {
        category(id, planned, CategoryType::Expense, Allocation::Fixed)
    }

    fn variable_expense(id: &str, proportion: Decimal) -> BudgetCategory {
        category(
            id,
            Decimal::ZERO,
            CategoryType::Expense,
            Allocation::Variable { proportion },
        )
    }

    #[test]
    fn splits_remainder_by_proportion() {
        let categories = vec![
            fixed_expense("rent", dec!(45000)),
            variable_expense("groceries", dec!(0.5)),
            variable_expense("transport", dec!(0.5)),
        ];

        let amounts = redistribute(dec!(150000), &categories);
        assert_eq!(
            amounts,
            vec![
                ("groceries".to_string(), dec!(52500.00)),
                ("transport".to_string(), dec!(52500.00)),
            ]
        );
    }

    #[test]
    fn allocated_total_matches_available_within_rounding() {
        let categories = vec![
            fixed_expense("rent", dec!(30000)),
            variable_expense("a", dec!(0.5)),
            variable_expense("b", dec!(0.2)),
            variable_expense("c", dec!(0.3)),
        ];

        let amounts = redistribute(dec!(100001.01), &categories);
        let allocated: Decimal = amounts.iter().map(|(_, a)| *a).sum();
        let available = dec!(100001.01) - dec!(30000);
        assert!((allocated - available).abs() <= dec!(0.02));
    }

    #[test]
    fn zero_total_proportion_is_a_no_op() {
        let categories = vec![
            fixed_expense("rent", dec!(1000)),
            variable_expense("a", dec!(0)),
        ];
        assert!(redistribute(dec!(5000), &categories).is_empty());
    }

    #[test]
    fn no_variable_categories_is_a_no_op() {
        let categories = vec![fixed_expense("rent", dec!(1000))];
        assert!(redistribute(dec!(5000), &categories).is_empty());
    }

    #[test]
    fn fixed_over_income_clamps_to_zero() {
        let categories = vec![
            fixed_expense("rent", dec!(9000)),
            variable_expense("a", dec!(1.0)),
        ];
        let amounts = redistribute(dec!(5000), &categories);
        assert_eq!(amounts, vec![("a".to_string(), dec!(0))]);
    }

    #[test]
    fn reapplying_produces_identical_amounts() {
        let mut categories = vec![
            fixed_expense("rent", dec!(12345.67)),
            variable_expense("a", dec!(0.7)),
            variable_expense("b", dec!(0.3)),
        ];

        let first = redistribute(dec!(98765.43), &categories);
        for (id, amount) in &first {
            let cat = categories.iter_mut().find(|c| &c.id == id).unwrap();
            cat.planned_amount = *amount;
        }
        let second = redistribute(dec!(98765.43), &categories);
        assert_eq!(first, second);
    }

    #[test]
    fn savings_and_income_categories_are_untouched() {
        let categories = vec![
            fixed_expense("rent", dec!(1000)),
            variable_expense("a", dec!(1.0)),
            category(
                "salary",
                dec!(0),
                CategoryType::Income,
                Allocation::Variable {
                    proportion: dec!(1.0),
                },
            ),
            category("nest-egg", dec!(500), CategoryType::Savings, Allocation::Fixed),
        ];

        let amounts = redistribute(dec!(10000), &categories);
        assert_eq!(amounts, vec![("a".to_string(), dec!(9000.00))]);
    }
}
