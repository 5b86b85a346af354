//! SQLite mirror of the AACT tables the trial query reads
//!
//! Only the columns the query touches are declared. Date columns stay TEXT
//! so values land in the pipeline exactly as the export wrote them.

pub const MIRROR_SCHEMA: &str = r#"
-- ============================================
-- STUDIES
-- ============================================

CREATE TABLE IF NOT EXISTS studies (
    nct_id TEXT PRIMARY KEY,               -- 'NCT01234567'
    brief_title TEXT,
    start_date TEXT,                       -- 'YYYY-MM-DD' or 'YYYY-MM', may be NULL
    completion_date TEXT,
    primary_completion_date TEXT,
    overall_status TEXT,                   -- 'RECRUITING', 'COMPLETED', ...
    phase TEXT,                            -- 'PHASE1', 'PHASE1/PHASE2', 'NA', ...
    enrollment INTEGER
);

-- ============================================
-- CONDITIONS / INTERVENTIONS / SPONSORS
-- ============================================

CREATE TABLE IF NOT EXISTS conditions (
    id INTEGER PRIMARY KEY,
    nct_id TEXT NOT NULL,
    name TEXT,
    FOREIGN KEY(nct_id) REFERENCES studies(nct_id)
);

CREATE TABLE IF NOT EXISTS interventions (
    id INTEGER PRIMARY KEY,
    nct_id TEXT NOT NULL,
    intervention_type TEXT,                -- 'DRUG', 'DEVICE', 'BEHAVIORAL', ...
    name TEXT,
    FOREIGN KEY(nct_id) REFERENCES studies(nct_id)
);

CREATE TABLE IF NOT EXISTS sponsors (
    id INTEGER PRIMARY KEY,
    nct_id TEXT NOT NULL,
    agency_class TEXT,
    lead_or_collaborator TEXT,             -- 'lead' | 'collaborator'
    name TEXT,
    FOREIGN KEY(nct_id) REFERENCES studies(nct_id)
);

-- ============================================
-- INDEXES
-- ============================================

CREATE INDEX IF NOT EXISTS idx_conditions_nct ON conditions(nct_id);
CREATE INDEX IF NOT EXISTS idx_interventions_nct ON interventions(nct_id);
CREATE INDEX IF NOT EXISTS idx_sponsors_nct ON sponsors(nct_id);
"#;

/// Alzheimer's and MCI trials, one row per (study, condition, intervention, sponsor).
pub const TRIAL_QUERY: &str = r#"
SELECT s.nct_id, s.brief_title, s.start_date, s.completion_date, s.overall_status,
       s.phase, s.enrollment, i.intervention_type, c.name AS condition,
       s.primary_completion_date, sp.name AS study_sponsor
FROM studies s
JOIN conditions c ON s.nct_id = c.nct_id
LEFT JOIN interventions i ON s.nct_id = i.nct_id
LEFT JOIN sponsors sp ON s.nct_id = sp.nct_id
WHERE LOWER(c.name) LIKE '%alzheimer%' OR LOWER(c.name) LIKE '%mild cognitive%'
"#;
