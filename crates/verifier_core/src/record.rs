use serde::{Deserialize, Serialize};

/// Overall verdict reported by the verification service.
///
/// Decoded from a JSON string: `"Valid"` is the only passing value, any other
/// string is treated as `Invalid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum VerificationStatus {
    Valid,
    Invalid,
}

impl From<String> for VerificationStatus {
    fn from(raw: String) -> Self {
        if raw == "Valid" {
            VerificationStatus::Valid
        } else {
            VerificationStatus::Invalid
        }
    }
}

impl VerificationStatus {
    pub fn label(self) -> &'static str {
        match self {
            VerificationStatus::Valid => "Valid",
            VerificationStatus::Invalid => "Invalid",
        }
    }
}

/// One backend verdict for a single address, as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailVerificationRecord {
    pub email: String,
    pub status: VerificationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default)]
    pub syntax_ok: bool,
    #[serde(default)]
    pub disposable: bool,
    #[serde(default)]
    pub free_provider: bool,
    #[serde(default)]
    pub dns_ok: bool,
    #[serde(default)]
    pub smtp_ok: bool,
    #[serde(default)]
    pub mailbox_ok: bool,
    #[serde(default)]
    pub spf_ok: bool,
    #[serde(default)]
    pub dkim_ok: bool,
    #[serde(default)]
    pub catch_all: bool,
    #[serde(default)]
    pub role_account: bool,
}

impl EmailVerificationRecord {
    /// A record with every facet unset and no reason.
    pub fn new(email: impl Into<String>, status: VerificationStatus) -> Self {
        Self {
            email: email.into(),
            status,
            reason: None,
            syntax_ok: false,
            disposable: false,
            free_provider: false,
            dns_ok: false,
            smtp_ok: false,
            mailbox_ok: false,
            spf_ok: false,
            dkim_ok: false,
            catch_all: false,
            role_account: false,
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub fn with_facet(mut self, facet: Facet, value: bool) -> Self {
        *self.facet_mut(facet) = value;
        self
    }

    pub fn is_valid(&self) -> bool {
        self.status == VerificationStatus::Valid
    }

    pub fn facet(&self, facet: Facet) -> bool {
        match facet {
            Facet::Syntax => self.syntax_ok,
            Facet::Disposable => self.disposable,
            Facet::FreeProvider => self.free_provider,
            Facet::Dns => self.dns_ok,
            Facet::Smtp => self.smtp_ok,
            Facet::Mailbox => self.mailbox_ok,
            Facet::Spf => self.spf_ok,
            Facet::Dkim => self.dkim_ok,
            Facet::CatchAll => self.catch_all,
            Facet::RoleAccount => self.role_account,
        }
    }

    fn facet_mut(&mut self, facet: Facet) -> &mut bool {
        match facet {
            Facet::Syntax => &mut self.syntax_ok,
            Facet::Disposable => &mut self.disposable,
            Facet::FreeProvider => &mut self.free_provider,
            Facet::Dns => &mut self.dns_ok,
            Facet::Smtp => &mut self.smtp_ok,
            Facet::Mailbox => &mut self.mailbox_ok,
            Facet::Spf => &mut self.spf_ok,
            Facet::Dkim => &mut self.dkim_ok,
            Facet::CatchAll => &mut self.catch_all,
            Facet::RoleAccount => &mut self.role_account,
        }
    }
}

/// The ten boolean signals carried by every record, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facet {
    Syntax,
    Disposable,
    FreeProvider,
    Dns,
    Smtp,
    Mailbox,
    Spf,
    Dkim,
    CatchAll,
    RoleAccount,
}

impl Facet {
    pub const ALL: [Facet; 10] = [
        Facet::Syntax,
        Facet::Disposable,
        Facet::FreeProvider,
        Facet::Dns,
        Facet::Smtp,
        Facet::Mailbox,
        Facet::Spf,
        Facet::Dkim,
        Facet::CatchAll,
        Facet::RoleAccount,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Facet::Syntax => "Syntax",
            Facet::Disposable => "Disposable",
            Facet::FreeProvider => "Free Provider",
            Facet::Dns => "DNS",
            Facet::Smtp => "SMTP",
            Facet::Mailbox => "Mailbox",
            Facet::Spf => "SPF",
            Facet::Dkim => "DKIM",
            Facet::CatchAll => "Catch All",
            Facet::RoleAccount => "Role Account",
        }
    }

    pub fn group(self) -> FacetGroup {
        match self {
            Facet::Syntax | Facet::Disposable | Facet::FreeProvider => FacetGroup::BasicChecks,
            Facet::Dns | Facet::Smtp | Facet::Mailbox => FacetGroup::ServerVerification,
            Facet::Spf | Facet::Dkim => FacetGroup::SecurityChecks,
            Facet::CatchAll | Facet::RoleAccount => FacetGroup::AdditionalInfo,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FacetGroup {
    BasicChecks,
    ServerVerification,
    SecurityChecks,
    AdditionalInfo,
}

impl FacetGroup {
    pub const ALL: [FacetGroup; 4] = [
        FacetGroup::BasicChecks,
        FacetGroup::ServerVerification,
        FacetGroup::SecurityChecks,
        FacetGroup::AdditionalInfo,
    ];

    pub fn title(self) -> &'static str {
        match self {
            FacetGroup::BasicChecks => "Basic Checks",
            FacetGroup::ServerVerification => "Server Verification",
            FacetGroup::SecurityChecks => "Security Checks",
            FacetGroup::AdditionalInfo => "Additional Info",
        }
    }

    pub fn facets(self) -> impl Iterator<Item = Facet> {
        Facet::ALL.into_iter().filter(move |facet| facet.group() == self)
    }
}
