//! Analytics service
//!
//! Loads transactions, categories, budgets and goals from storage and hands
//! them to the pure computations in `crate::analytics`.

use chrono::NaiveDate;
use tracing::debug;

use crate::analytics::health::{last_complete_month_end, STABILITY_MONTHS};
use crate::analytics::{
    category_insights, monthly_expense_totals, spending_trends, CategoryInsight, FinancialKpis,
    Granularity, HealthInputs, HealthScore, PeriodComparison, SpendingTrends,
};
use crate::error::FinsightResult;
use crate::models::{BudgetStatus, DateRange};
use crate::storage::Storage;

/// Service for period analytics
pub struct AnalyticsService<'a> {
    storage: &'a Storage,
}

impl<'a> AnalyticsService<'a> {
    /// Create a new analytics service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Income, expense and savings figures for a range
    pub fn kpis(&self, range: DateRange) -> FinsightResult<FinancialKpis> {
        let transactions = self.storage.transactions.get_by_date_range(range)?;
        debug!(%range, count = transactions.len(), "computing kpis");
        Ok(FinancialKpis::compute(&transactions, range))
    }

    /// A range compared with the range immediately before it
    pub fn compare(&self, range: DateRange) -> FinsightResult<PeriodComparison> {
        let transactions = self.storage.transactions.get_all()?;
        debug!(%range, previous = %range.previous(), "computing period comparison");
        Ok(PeriodComparison::compute(&transactions, range))
    }

    /// Expense and income totals bucketed by day, week or month
    pub fn trends(
        &self,
        range: DateRange,
        granularity: Granularity,
    ) -> FinsightResult<SpendingTrends> {
        let transactions = self.storage.transactions.get_by_date_range(range)?;
        debug!(%range, %granularity, "computing spending trends");
        Ok(spending_trends(&transactions, range, granularity))
    }

    /// Expenses of a range broken down by category
    pub fn category_insights(&self, range: DateRange) -> FinsightResult<Vec<CategoryInsight>> {
        let transactions = self.storage.transactions.get_all()?;
        let categories = self.storage.categories.get_all()?;
        let budgets = self.storage.budgets.get_all()?;
        debug!(%range, categories = categories.len(), "computing category insights");
        Ok(category_insights(&transactions, &categories, &budgets, range))
    }

    /// Financial health score for a range
    ///
    /// Budget adherence uses every budget overlapping the range. Expense
    /// stability looks at completed months up to the end of the range, so
    /// the month `today` falls in only counts once it is over.
    pub fn health(&self, range: DateRange, today: NaiveDate) -> FinsightResult<HealthScore> {
        let transactions = self.storage.transactions.get_all()?;
        let kpis = FinancialKpis::compute(&transactions, range);

        let budget_statuses: Vec<BudgetStatus> = self
            .storage
            .budgets
            .get_all()?
            .iter()
            .filter(|b| b.range().overlaps(&range))
            .map(|b| BudgetStatus::compute(b, &transactions, today))
            .collect();

        let stability_end = range.end.min(last_complete_month_end(today));
        let monthly_expenses =
            monthly_expense_totals(&transactions, stability_end, STABILITY_MONTHS);
        let goals = self.storage.goals.get_all()?;

        debug!(
            %range,
            budgets = budget_statuses.len(),
            months = monthly_expenses.len(),
            goals = goals.len(),
            "computing health score"
        );

        Ok(HealthScore::compute(&HealthInputs {
            kpis: &kpis,
            budget_statuses: &budget_statuses,
            monthly_expenses: &monthly_expenses,
            goals: &goals,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::FinsightPaths;
    use crate::models::{Budget, BudgetPeriod, Category, Goal, Money, Transaction, TransactionType};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinsightPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).unwrap()
    }

    /// Salary plus rent and groceries in February and March
    fn seed(storage: &Storage) -> (Category, Category) {
        let rent = Category::new("Rent", TransactionType::Expense);
        let groceries = Category::new("Groceries", TransactionType::Expense);
        storage.categories.upsert(rent.clone()).unwrap();
        storage.categories.upsert(groceries.clone()).unwrap();

        let rows = [
            (TransactionType::Income, None, 400000, date(2, 1)),
            (TransactionType::Expense, Some(rent.id), 150000, date(2, 2)),
            (TransactionType::Expense, Some(groceries.id), 40000, date(2, 10)),
            (TransactionType::Income, None, 400000, date(3, 1)),
            (TransactionType::Expense, Some(rent.id), 150000, date(3, 2)),
            (TransactionType::Expense, Some(groceries.id), 50000, date(3, 12)),
            (TransactionType::Expense, None, 10000, date(3, 20)),
        ];
        for (t, category, cents, on) in rows {
            storage
                .transactions
                .upsert(Transaction::with_details(
                    Money::from_cents(cents),
                    t,
                    on,
                    category,
                    "",
                ))
                .unwrap();
        }

        (rent, groceries)
    }

    #[test]
    fn test_kpis_and_compare() {
        let (_temp_dir, storage) = create_test_storage();
        seed(&storage);
        let service = AnalyticsService::new(&storage);
        let march = DateRange::month_of(date(3, 1));

        let kpis = service.kpis(march).unwrap();
        assert_eq!(kpis.total_income, Money::from_cents(400000));
        assert_eq!(kpis.total_expenses, Money::from_cents(210000));
        assert_eq!(kpis.net_income, Money::from_cents(190000));

        let comparison = service.compare(march).unwrap();
        assert_eq!(comparison.previous.total_expenses, Money::from_cents(190000));
        assert_eq!(comparison.expenses.absolute, Money::from_cents(20000));
    }

    #[test]
    fn test_category_totals_add_up() {
        let (_temp_dir, storage) = create_test_storage();
        seed(&storage);
        let service = AnalyticsService::new(&storage);
        let march = DateRange::month_of(date(3, 1));

        let insights = service.category_insights(march).unwrap();
        let total: Money = insights.iter().map(|i| i.total).sum();
        assert_eq!(total, service.kpis(march).unwrap().total_expenses);
        assert_eq!(insights[0].name, "Rent");
        assert_eq!(insights.len(), 3);
    }

    #[test]
    fn test_trends() {
        let (_temp_dir, storage) = create_test_storage();
        seed(&storage);
        let service = AnalyticsService::new(&storage);
        let range = DateRange::new(date(2, 1), date(3, 31)).unwrap();

        let trends = service.trends(range, Granularity::Monthly).unwrap();
        assert_eq!(trends.points.len(), 2);
        assert_eq!(trends.points[1].expenses, Money::from_cents(210000));
    }

    #[test]
    fn test_health_uses_budgets_and_goals() {
        let (_temp_dir, storage) = create_test_storage();
        let (rent, groceries) = seed(&storage);

        storage
            .budgets
            .upsert(Budget::new(rent.id, Money::from_cents(150000), BudgetPeriod::Monthly, date(3, 1)))
            .unwrap();
        storage
            .budgets
            .upsert(Budget::new(
                groceries.id,
                Money::from_cents(40000),
                BudgetPeriod::Monthly,
                date(3, 1),
            ))
            .unwrap();
        let mut goal = Goal::new("Emergency Fund", Money::from_cents(100000));
        goal.current_amount = Money::from_cents(50000);
        storage.goals.upsert(goal).unwrap();

        let service = AnalyticsService::new(&storage);
        let health = service
            .health(DateRange::month_of(date(3, 1)), date(3, 31))
            .unwrap();

        assert_eq!(health.components.budget_adherence, Some(50.0));
        assert_eq!(health.components.goal_progress, Some(50.0));
        assert!(health.components.savings.is_some());
        assert!(health.components.expense_stability.is_some());
        assert!(health.score <= 100);
    }

    #[test]
    fn test_health_ignores_month_in_progress() {
        let (_temp_dir, storage) = create_test_storage();
        seed(&storage);
        storage
            .transactions
            .upsert(Transaction::new(
                Money::from_cents(5000),
                TransactionType::Expense,
                date(4, 3),
            ))
            .unwrap();
        let service = AnalyticsService::new(&storage);

        let april = service
            .health(DateRange::month_of(date(4, 1)), date(4, 10))
            .unwrap();
        let through_march = service
            .health(DateRange::month_of(date(3, 1)), date(4, 10))
            .unwrap();
        assert_eq!(
            april.components.expense_stability,
            through_march.components.expense_stability
        );

        let after_april = service
            .health(DateRange::month_of(date(4, 1)), date(5, 2))
            .unwrap();
        assert_ne!(
            after_april.components.expense_stability,
            through_march.components.expense_stability
        );
    }

    #[test]
    fn test_health_with_no_data() {
        let (_temp_dir, storage) = create_test_storage();
        let service = AnalyticsService::new(&storage);

        let health = service
            .health(DateRange::month_of(date(3, 1)), date(3, 15))
            .unwrap();
        assert_eq!(health.score, 0);
    }
}
