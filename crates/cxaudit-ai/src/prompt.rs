use cxaudit_core::{CompanyInfo, PageSpeedResult};

/// One worked audit, used as a one-shot exemplar in every prompt. It is
/// illustrative text, never served as cached data.
const WELLS_FARGO_EXAMPLE: &str = "\
Here is an example of a completed audit for Wells Fargo (score 64, adequate tier):
- AI Readiness (25% weight, score 68): Deployed Fargo virtual assistant on Google Cloud AI. Lacks AI-powered personalization. Strong internal AI investment but limited customer-facing applications.
- Mobile App (25% weight, score 58): 4.7 iOS rating but declining sentiment on navigation. Bill pay requires too many taps. Lacks biometric auth for in-app actions.
- Customer Sentiment (20% weight, score 55): NPS of 12 vs industry 34. Negative social sentiment on fees. Branch satisfaction much higher than digital.
- Web Experience (15% weight, score 72): Lighthouse 88 performance, good Core Web Vitals. But fragmented design systems and low account opening completion rates.
- Accessibility (15% weight, score 61): Mostly WCAG 2.1 AA compliant but gaps in dynamic content. Inconsistent screen reader support. Poor contrast in data visualizations.

Each finding has: observation (what we found), whyItMatters (business impact), evidence (specific data points).
Recommendations are actionable and specific to the company's situation.";

pub fn page_speed_summary(page_speed: Option<&PageSpeedResult>) -> String {
    match page_speed {
        Some(ps) => format!(
            "PageSpeed Insights (mobile):\n\
             - Performance: {}/100\n\
             - Accessibility: {}/100\n\
             - LCP: {}ms\n\
             - CLS: {:.3}\n\
             - Max Potential FID: {}ms\n\
             - Mobile usable: {}",
            ps.performance_score,
            ps.accessibility_score,
            ps.lcp.round() as i64,
            ps.cls,
            ps.fid.round() as i64,
            ps.mobile_usability,
        ),
        None => "PageSpeed data unavailable — base web experience and accessibility scores on HTML analysis only.".to_string(),
    }
}

/// The single user message: rubric, tier thresholds, exemplar, collected
/// data, and output-shape instructions.
pub fn build_prompt(
    company: &CompanyInfo,
    html: &str,
    page_speed: Option<&PageSpeedResult>,
) -> String {
    format!(
        "You are a CX auditor for financial services companies. Analyze the following data and produce a detailed CX audit.\n\
         \n\
         COMPANY: {name} ({sector})\n\
         WEBSITE: {website}\n\
         \n\
         SCORING RUBRIC:\n\
         - AI Readiness (25% weight): Chatbot/VA presence, AI features, innovation signals\n\
         - Mobile App Experience (25% weight): Mobile-friendliness, app links present, mobile-first design signals\n\
         - Customer Sentiment (20% weight): Trust signals, testimonials, complaint handling, brand messaging\n\
         - Web Experience (15% weight): PageSpeed metrics, navigation clarity, value proposition\n\
         - Accessibility (15% weight): WCAG signals, semantic HTML, contrast, assistive tech support\n\
         \n\
         TIER THRESHOLDS:\n\
         - Strong: 75-100\n\
         - Adequate: 50-74\n\
         - Needs Work: 0-49\n\
         \n\
         The overallScore MUST equal the weighted average of category scores (rounded to nearest integer).\n\
         \n\
         {example}\n\
         \n\
         COLLECTED DATA:\n\
         \n\
         {page_speed}\n\
         \n\
         HOMEPAGE HTML (truncated):\n\
         {html}\n\
         \n\
         Produce 5 categories with exactly 3 findings each (observation, whyItMatters, evidence) and exactly 4 recommendations. Be specific and evidence-based — reference actual content from the HTML and PageSpeed data. Do not make up specific numeric statistics that aren't supported by the data provided; instead reference qualitative observations from the website content. Use the submit_audit tool to return your analysis.",
        name = company.name,
        sector = company.sector,
        website = company.website,
        example = WELLS_FARGO_EXAMPLE,
        page_speed = page_speed_summary(page_speed),
        html = html,
    )
}
