use crate::models::company::Company;

/// Client-side operations over the company directory.
pub struct CompanyService;

impl CompanyService {
    /// Companies whose name, symbol or sector contains `query`
    /// (case-insensitive). A blank query returns every company, in order.
    pub fn filter<'a>(companies: &'a [Company], query: &str) -> Vec<&'a Company> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return companies.iter().collect();
        }
        companies
            .iter()
            .filter(|c| c.matches_lowercase(&needle))
            .collect()
    }

    /// Find a company by symbol (case-insensitive).
    pub fn find_by_symbol<'a>(companies: &'a [Company], symbol: &str) -> Option<&'a Company> {
        let upper = symbol.trim().to_uppercase();
        companies.iter().find(|c| c.symbol == upper)
    }

    /// Distinct sectors, sorted.
    pub fn sectors(companies: &[Company]) -> Vec<&str> {
        let mut sectors: Vec<&str> = companies.iter().map(|c| c.sector.as_str()).collect();
        sectors.sort_unstable();
        sectors.dedup();
        sectors
    }
}
