use crate::types::{CompanyInfo, Sector};
use once_cell::sync::Lazy;

/// The fixed allow-list of auditable companies. The fetchers only ever
/// receive hostnames taken from this table; a client-supplied id that
/// does not resolve here is rejected before any outbound call.
pub static COMPANIES: Lazy<Vec<CompanyInfo>> = Lazy::new(|| {
    use Sector::*;
    vec![
        CompanyInfo::new("wells-fargo", "Wells Fargo", "wellsfargo.com", Bank),
        CompanyInfo::new("jpmorgan-chase", "JPMorgan Chase", "chase.com", Bank),
        CompanyInfo::new("bank-of-america", "Bank of America", "bankofamerica.com", Bank),
        CompanyInfo::new("citigroup", "Citigroup", "citi.com", Bank),
        CompanyInfo::new("us-bancorp", "U.S. Bancorp", "usbank.com", Bank),
        CompanyInfo::new("pnc-financial", "PNC Financial", "pnc.com", Bank),
        CompanyInfo::new("truist-financial", "Truist Financial", "truist.com", Bank),
        CompanyInfo::new("capital-one", "Capital One", "capitalone.com", Bank),
        CompanyInfo::new("td-bank", "TD Bank", "td.com", Bank),
        CompanyInfo::new("goldman-sachs", "Goldman Sachs", "goldmansachs.com", Bank),
        CompanyInfo::new("state-farm", "State Farm", "statefarm.com", Insurance),
        CompanyInfo::new("progressive", "Progressive", "progressive.com", Insurance),
        CompanyInfo::new("allstate", "Allstate", "allstate.com", Insurance),
        CompanyInfo::new("geico", "GEICO", "geico.com", Insurance),
        CompanyInfo::new("usaa", "USAA", "usaa.com", Insurance),
        CompanyInfo::new("liberty-mutual", "Liberty Mutual", "libertymutual.com", Insurance),
        CompanyInfo::new("nationwide", "Nationwide", "nationwide.com", Insurance),
        CompanyInfo::new("travelers", "Travelers", "travelers.com", Insurance),
        CompanyInfo::new("metlife", "MetLife", "metlife.com", Insurance),
        CompanyInfo::new("prudential", "Prudential", "prudential.com", Insurance),
    ]
});

/// Resolve a client-supplied identifier to its trusted company record.
pub fn resolve(id: &str) -> Option<&'static CompanyInfo> {
    COMPANIES.iter().find(|c| c.id == id)
}
