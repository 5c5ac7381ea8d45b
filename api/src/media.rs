//! Upload storage for the file columns on programme records.
//!
//! Every upload kind owns a fixed directory under the media root, a size cap
//! and an optional extension allow-list. Stored paths are relative to the
//! root so they can be written straight into the owning record.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use entity::{
    brainstorming_session, company, csr_proposal, csr_report, event, execution_log,
    financial_tracking, governance_meeting, impact_story, initiative, job_application, job_seeker,
    member, metric_progress, program_logbook, progress_report, risk_assessment, student_volunteer,
};
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

const MB: u64 = 1024 * 1024;
const IMAGES: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];
const DOCUMENTS: &[&str] = &["pdf", "doc", "docx"];
const PDF: &[&str] = &["pdf"];

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("File size cannot exceed {} MB", .limit / MB)]
    FileTooLarge { limit: u64 },
    #[error("File extension '{extension}' is not allowed. Allowed extensions are: {}", .allowed.join(", "))]
    ExtensionNotAllowed {
        extension: String,
        allowed: &'static [&'static str],
    },
    #[error("The submitted file is empty")]
    EmptyUpload,
    #[error("unknown upload kind '{0}'")]
    UnknownKind(String),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Db(#[from] DbErr),
}

/// The file columns that accept uploads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    MemberProfile,
    StudentResume,
    StudentPhoto,
    CompletionCertificate,
    InitiativeDocument,
    EventMaterial,
    RiskDocument,
    CsrProposal,
    FinancialRecord,
    LogbookDocument,
    ImpactStoryMedia,
    CompanyLogo,
    SeekerResume,
    ApplicationResume,
    BrainstormingDocument,
    ExecutionPhoto,
    MeetingDocument,
    MetricDocument,
    CsrReport,
    ProgressReport,
}

impl UploadKind {
    pub const ALL: [UploadKind; 20] = [
        UploadKind::MemberProfile,
        UploadKind::StudentResume,
        UploadKind::StudentPhoto,
        UploadKind::CompletionCertificate,
        UploadKind::InitiativeDocument,
        UploadKind::EventMaterial,
        UploadKind::RiskDocument,
        UploadKind::CsrProposal,
        UploadKind::FinancialRecord,
        UploadKind::LogbookDocument,
        UploadKind::ImpactStoryMedia,
        UploadKind::CompanyLogo,
        UploadKind::SeekerResume,
        UploadKind::ApplicationResume,
        UploadKind::BrainstormingDocument,
        UploadKind::ExecutionPhoto,
        UploadKind::MeetingDocument,
        UploadKind::MetricDocument,
        UploadKind::CsrReport,
        UploadKind::ProgressReport,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            UploadKind::MemberProfile => "member-profile",
            UploadKind::StudentResume => "student-resume",
            UploadKind::StudentPhoto => "student-photo",
            UploadKind::CompletionCertificate => "completion-certificate",
            UploadKind::InitiativeDocument => "initiative-document",
            UploadKind::EventMaterial => "event-material",
            UploadKind::RiskDocument => "risk-document",
            UploadKind::CsrProposal => "csr-proposal",
            UploadKind::FinancialRecord => "financial-record",
            UploadKind::LogbookDocument => "logbook-document",
            UploadKind::ImpactStoryMedia => "impact-story-media",
            UploadKind::CompanyLogo => "company-logo",
            UploadKind::SeekerResume => "seeker-resume",
            UploadKind::ApplicationResume => "application-resume",
            UploadKind::BrainstormingDocument => "brainstorming-document",
            UploadKind::ExecutionPhoto => "execution-photo",
            UploadKind::MeetingDocument => "meeting-document",
            UploadKind::MetricDocument => "metric-document",
            UploadKind::CsrReport => "csr-report",
            UploadKind::ProgressReport => "progress-report",
        }
    }

    pub fn directory(self) -> &'static str {
        match self {
            UploadKind::MemberProfile => "member_profiles",
            UploadKind::StudentResume => "student_resumes",
            UploadKind::StudentPhoto => "student_photos",
            UploadKind::CompletionCertificate => "completion_certificates",
            UploadKind::InitiativeDocument => "initiative_docs",
            UploadKind::EventMaterial => "event_materials",
            UploadKind::RiskDocument => "risk_documents",
            UploadKind::CsrProposal => "csr_proposals",
            UploadKind::FinancialRecord => "financial_records",
            UploadKind::LogbookDocument => "logbook_docs",
            UploadKind::ImpactStoryMedia => "impact_stories",
            UploadKind::CompanyLogo => "company_logos",
            UploadKind::SeekerResume => "resumes",
            UploadKind::ApplicationResume => "application_resumes",
            UploadKind::BrainstormingDocument => "brainstorming_docs",
            UploadKind::ExecutionPhoto => "execution_photos",
            UploadKind::MeetingDocument => "meeting_documents",
            UploadKind::MetricDocument => "metric_documents",
            UploadKind::CsrReport => "csr_reports",
            UploadKind::ProgressReport => "progress_reports",
        }
    }

    pub fn max_bytes(self) -> u64 {
        match self {
            UploadKind::MemberProfile
            | UploadKind::StudentResume
            | UploadKind::StudentPhoto
            | UploadKind::CompletionCertificate
            | UploadKind::CompanyLogo
            | UploadKind::SeekerResume
            | UploadKind::ApplicationResume => 5 * MB,
            _ => 10 * MB,
        }
    }

    /// `None` accepts any extension.
    pub fn allowed_extensions(self) -> Option<&'static [&'static str]> {
        match self {
            UploadKind::MemberProfile | UploadKind::StudentPhoto | UploadKind::CompanyLogo => {
                Some(IMAGES)
            }
            UploadKind::StudentResume
            | UploadKind::SeekerResume
            | UploadKind::ApplicationResume => Some(DOCUMENTS),
            UploadKind::CompletionCertificate => Some(PDF),
            _ => None,
        }
    }

    fn owner(self) -> &'static str {
        match self {
            UploadKind::MemberProfile => "Member",
            UploadKind::StudentResume
            | UploadKind::StudentPhoto
            | UploadKind::CompletionCertificate => "Student volunteer",
            UploadKind::InitiativeDocument => "Initiative",
            UploadKind::EventMaterial => "Event",
            UploadKind::RiskDocument => "Risk assessment",
            UploadKind::CsrProposal => "CSR proposal",
            UploadKind::FinancialRecord => "Financial record",
            UploadKind::LogbookDocument => "Logbook entry",
            UploadKind::ImpactStoryMedia => "Impact story",
            UploadKind::CompanyLogo => "Company",
            UploadKind::SeekerResume => "Job seeker",
            UploadKind::ApplicationResume => "Job application",
            UploadKind::BrainstormingDocument => "Brainstorming session",
            UploadKind::ExecutionPhoto => "Execution log",
            UploadKind::MeetingDocument => "Governance meeting",
            UploadKind::MetricDocument => "Metric progress",
            UploadKind::CsrReport => "CSR report",
            UploadKind::ProgressReport => "Progress report",
        }
    }

    pub fn check(self, file_name: &str, size: u64) -> Result<(), MediaError> {
        if size == 0 {
            return Err(MediaError::EmptyUpload);
        }
        let limit = self.max_bytes();
        if size > limit {
            return Err(MediaError::FileTooLarge { limit });
        }
        if let Some(allowed) = self.allowed_extensions() {
            let extension = Path::new(file_name)
                .extension()
                .and_then(|ext| ext.to_str())
                .map(str::to_ascii_lowercase)
                .unwrap_or_default();
            if !allowed.contains(&extension.as_str()) {
                return Err(MediaError::ExtensionNotAllowed { extension, allowed });
            }
        }
        Ok(())
    }
}

impl FromStr for UploadKind {
    type Err = MediaError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        UploadKind::ALL
            .into_iter()
            .find(|kind| kind.slug() == value)
            .ok_or_else(|| MediaError::UnknownKind(value.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredFile {
    /// Path relative to the media root, always `/`-separated.
    pub path: String,
    pub size: u64,
}

#[derive(Debug, Clone)]
pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub async fn save(
        &self,
        kind: UploadKind,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<StoredFile, MediaError> {
        kind.check(file_name, bytes.len() as u64)?;
        let dir = self.root.join(kind.directory());
        tokio::fs::create_dir_all(&dir).await?;
        let prefix = Uuid::new_v4().simple().to_string();
        let stored_name = format!("{}_{}", &prefix[..8], sanitize_file_name(file_name));
        tokio::fs::write(dir.join(&stored_name), bytes).await?;
        tracing::info!(kind = kind.slug(), file = %stored_name, size = bytes.len(), "stored upload");
        Ok(StoredFile {
            path: format!("{}/{}", kind.directory(), stored_name),
            size: bytes.len() as u64,
        })
    }

    pub async fn remove(&self, relative: &str) -> Result<(), MediaError> {
        match tokio::fs::remove_file(self.root.join(relative)).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    /// Store an upload and point the owning record's file column at it.
    pub async fn upload(
        &self,
        db: &DatabaseConnection,
        kind: UploadKind,
        owner_id: Uuid,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<StoredFile, MediaError> {
        let stored = self.save(kind, file_name, bytes).await?;
        match attach(db, kind, owner_id, &stored.path).await {
            Ok(0) => {
                self.remove(&stored.path).await?;
                Err(MediaError::NotFound(kind.owner()))
            }
            Ok(_) => Ok(stored),
            Err(err) => {
                self.remove(&stored.path).await?;
                Err(err.into())
            }
        }
    }
}

macro_rules! set_path {
    ($db:expr, $entity:ident, $column:ident, $id:expr, $path:expr) => {
        $entity::Entity::update_many()
            .col_expr($entity::Column::$column, Expr::value(Some($path.to_string())))
            .filter($entity::Column::Id.eq($id))
            .exec($db)
            .await
            .map(|res| res.rows_affected)
    };
}

async fn attach(
    db: &DatabaseConnection,
    kind: UploadKind,
    id: Uuid,
    path: &str,
) -> Result<u64, DbErr> {
    match kind {
        UploadKind::MemberProfile => set_path!(db, member, ProfilePicture, id, path),
        UploadKind::StudentResume => set_path!(db, student_volunteer, Resume, id, path),
        UploadKind::StudentPhoto => set_path!(db, student_volunteer, Photograph, id, path),
        UploadKind::CompletionCertificate => {
            set_path!(db, student_volunteer, CompletionCertificate, id, path)
        }
        UploadKind::InitiativeDocument => set_path!(db, initiative, Attachments, id, path),
        UploadKind::EventMaterial => set_path!(db, event, Materials, id, path),
        UploadKind::RiskDocument => set_path!(db, risk_assessment, Attachments, id, path),
        UploadKind::CsrProposal => set_path!(db, csr_proposal, ProposalDocument, id, path),
        UploadKind::FinancialRecord => {
            set_path!(db, financial_tracking, BillsAttachment, id, path)
        }
        UploadKind::LogbookDocument => set_path!(db, program_logbook, Attachments, id, path),
        UploadKind::ImpactStoryMedia => set_path!(db, impact_story, MediaAttachments, id, path),
        UploadKind::CompanyLogo => set_path!(db, company, Logo, id, path),
        UploadKind::SeekerResume => set_path!(db, job_seeker, Resume, id, path),
        UploadKind::ApplicationResume => set_path!(db, job_application, Resume, id, path),
        UploadKind::BrainstormingDocument => {
            set_path!(db, brainstorming_session, Attachments, id, path)
        }
        UploadKind::ExecutionPhoto => set_path!(db, execution_log, Photos, id, path),
        UploadKind::MeetingDocument => set_path!(db, governance_meeting, Attachments, id, path),
        UploadKind::MetricDocument => {
            set_path!(db, metric_progress, SupportingDocument, id, path)
        }
        UploadKind::CsrReport => set_path!(db, csr_report, ReportFile, id, path),
        UploadKind::ProgressReport => set_path!(db, progress_report, ReportFile, id, path),
    }
}

/// Keep the final path component, restricted to a portable character set.
pub fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || matches!(ch, '.' | '-' | '_') {
                ch
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names_lose_directories_and_odd_characters() {
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("C:\\docs\\My CV (final).pdf"), "My_CV__final_.pdf");
        assert_eq!(sanitize_file_name(".hidden"), "hidden");
        assert_eq!(sanitize_file_name(""), "upload");
    }

    #[test]
    fn kinds_round_trip_through_their_slug() {
        for kind in UploadKind::ALL {
            assert_eq!(kind.slug().parse::<UploadKind>().unwrap(), kind);
        }
        assert!(matches!(
            "avatar".parse::<UploadKind>(),
            Err(MediaError::UnknownKind(_))
        ));
    }

    #[test]
    fn size_caps_and_extensions() {
        let kind = UploadKind::StudentResume;
        assert!(kind.check("cv.PDF", 1024).is_ok());
        assert!(matches!(
            kind.check("cv.pdf", 5 * MB + 1),
            Err(MediaError::FileTooLarge { limit }) if limit == 5 * MB
        ));
        assert!(matches!(
            kind.check("cv.exe", 10),
            Err(MediaError::ExtensionNotAllowed { .. })
        ));
        assert!(matches!(kind.check("cv.pdf", 0), Err(MediaError::EmptyUpload)));
        assert!(UploadKind::InitiativeDocument.check("plan.xlsx", 9 * MB).is_ok());
        assert!(UploadKind::CsrReport.check("q3.pptx", 10 * MB).is_ok());
        assert!(matches!(
            UploadKind::ProgressReport.check("q3.pdf", 10 * MB + 1),
            Err(MediaError::FileTooLarge { limit }) if limit == 10 * MB
        ));
    }

    #[test]
    fn size_error_reports_megabytes() {
        let err = MediaError::FileTooLarge { limit: 10 * MB };
        assert_eq!(err.to_string(), "File size cannot exceed 10 MB");
    }
}
