use crate::access::store::{RoleStorage, RoleStore};
use crate::access::tier::{effective_role, Tier};

/// Declared requirement of a page, matched by its `data-page` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    QuickRequired,
    LeadRequired,
    MemberOnly,
    ForumRequired,
}

impl PageKind {
    const fn required_tier(self) -> Tier {
        match self {
            Self::QuickRequired => Tier::Quick,
            Self::LeadRequired => Tier::Lead,
            Self::MemberOnly | Self::ForumRequired => Tier::Member,
        }
    }

    /// Landing page for visitors below the requirement.
    const fn redirect_target(self) -> &'static str {
        match self {
            Self::QuickRequired => "/quick-unlock.html",
            Self::LeadRequired => "/education.html",
            Self::MemberOnly | Self::ForumRequired => "/login.html",
        }
    }
}

/// Guarded navigation destinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavTarget {
    EduCenter,
    EduCommunity,
    Forum,
}

/// UI language for denial messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lang {
    En,
    Zh,
}

/// Why a navigation click was suppressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    QuickNeeded,
    LeadNeeded,
    MemberNeeded,
}

impl DenyReason {
    #[must_use]
    pub const fn title(self, lang: Lang) -> &'static str {
        match lang {
            Lang::En => "Access required",
            Lang::Zh => "需要权限",
        }
    }

    #[must_use]
    pub const fn message(self, lang: Lang) -> &'static str {
        match (self, lang) {
            (Self::QuickNeeded, Lang::En) => "Please unlock EduCenter first.",
            (Self::QuickNeeded, Lang::Zh) => "请先完成 Quick Unlock 才能进入 EduCenter。",
            (Self::LeadNeeded, Lang::En) => "EduCommunity requires Join List access.",
            (Self::LeadNeeded, Lang::Zh) => "EduCommunity 需要 Join List 权限。",
            (Self::MemberNeeded, Lang::En) => "Members only. Please log in.",
            (Self::MemberNeeded, Lang::Zh) => "仅限会员。请先登录。",
        }
    }
}

/// Page-load access control around a [`RoleStore`].
///
/// The embedding page calls [`reconcile`](Self::reconcile) once per load with
/// the `/api/me` answer, then consults the guards with the tier it returned.
/// A request that never completes leaves the stored role in charge; the
/// upward correction is simply not applied.
#[derive(Debug)]
pub struct AccessController<S> {
    store: RoleStore<S>,
}

impl<S: RoleStorage> AccessController<S> {
    pub fn new(storage: S) -> Self {
        Self {
            store: RoleStore::new(storage),
        }
    }

    /// Stored role without server input.
    pub fn stored_role(&self) -> Tier {
        self.store.stored_role()
    }

    /// Resolve the effective tier against the server-confirmed login state
    /// and persist the upward-only correction: once the server confirms a
    /// login, the stored tag becomes `member` and stays there for as long
    /// as the cookie keeps validating.
    pub fn reconcile(&mut self, server_confirmed: bool) -> Tier {
        let stored = self.store.stored_role();
        let effective = effective_role(stored, server_confirmed);
        if server_confirmed && stored != Tier::Member {
            self.store.set_role(Tier::Member, true);
        }
        effective
    }

    /// Redirect target when a direct page access is below the requirement,
    /// `None` when rendering may continue.
    #[must_use]
    pub fn page_redirect(page: PageKind, tier: Tier) -> Option<&'static str> {
        if tier.meets(page.required_tier()) {
            None
        } else {
            Some(page.redirect_target())
        }
    }

    /// Check a guarded navigation link. `Err` means the click must be
    /// suppressed and the reason shown instead of navigating.
    pub fn nav_check(target: NavTarget, tier: Tier) -> Result<(), DenyReason> {
        match target {
            NavTarget::EduCenter if !tier.meets(Tier::Quick) => Err(DenyReason::QuickNeeded),
            NavTarget::EduCommunity if !tier.meets(Tier::Lead) => Err(DenyReason::LeadNeeded),
            NavTarget::Forum if !tier.meets(Tier::Member) => Err(DenyReason::MemberNeeded),
            _ => Ok(()),
        }
    }

    /// Quick-unlock upgrade; returns the page to redirect to.
    pub fn unlock_quick(&mut self) -> &'static str {
        self.store.set_role(Tier::Quick, true);
        "/education.html"
    }

    /// Join-list upgrade; returns the page to redirect to.
    pub fn upgrade_to_lead(&mut self) -> &'static str {
        self.store.set_role(Tier::Lead, true);
        "/education.html"
    }

    /// Member upgrade after a successful login; returns the page to
    /// redirect to.
    pub fn upgrade_to_member(&mut self) -> &'static str {
        self.store.set_role(Tier::Member, true);
        "/education.html"
    }

    /// Clear all local role state; the embedder also calls `/api/logout`.
    /// Returns the page to redirect to.
    pub fn logout(&mut self) -> &'static str {
        self.store.clear();
        "/"
    }
}
