//! Relational schema for the programme-management suite.
//!
//! One module per table. Save hooks (`ActiveModelBehavior::before_save`)
//! assign ids, stamp timestamps, derive dependent fields and run
//! [`validation::Validate`] before anything reaches the database.

mod hooks;
pub mod validation;

pub use hooks::{now, slugify, today};

// users
pub mod core_committee;
pub mod department;
pub mod member;
pub mod student_volunteer;
pub mod user;

// initiatives
pub mod brainstorming_session;
pub mod budget;
pub mod event;
pub mod event_feedback;
pub mod event_speaker;
pub mod event_volunteer;
pub mod execution_log;
pub mod execution_log_participant;
pub mod initiative;
pub mod initiative_stakeholder;
pub mod initiative_volunteer;
pub mod kpi;
pub mod milestone;
pub mod risk;
pub mod stakeholder;
pub mod task;
pub mod task_dependency;

// governance
pub mod csr_proposal;
pub mod governance_body;
pub mod governance_body_member;
pub mod governance_meeting;
pub mod governance_meeting_attendee;
pub mod risk_assessment;

// monitoring
pub mod financial_tracking;
pub mod kpi_metric;
pub mod metric_progress;

// documentation
pub mod csr_report;
pub mod csr_report_story;
pub mod impact_story;
pub mod program_logbook;
pub mod progress_report;
pub mod sdg_mapping;

// sustainability
pub mod annual_budget;
pub mod budget_tracking;

// program design
pub mod diversity_metric;

// job portal
pub mod company;
pub mod industry;
pub mod job;
pub mod job_application;
pub mod job_seeker;
