//! Checklist service
//!
//! Checklists hang off a schedule one-to-one. Items are always replaced
//! wholesale, and every assignment must name a membership row of the
//! schedule's club.

use std::collections::HashSet;

use club_core::entities::{CheckList, CheckListItem, ItemAssign};
use club_core::{DomainError, Snowflake};
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{CheckListItemRequest, CheckListRequest, CheckListResponse};

use super::authorization::AuthorizationChecker;
use super::context::ServiceContext;
use super::error::ServiceResult;

/// Checklist service
pub struct CheckListService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CheckListService<'a> {
    /// Create a new CheckListService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Build items for `checklist_id`, resolving assignments in `club_id`
    async fn build_items(
        &self,
        checklist_id: Snowflake,
        club_id: Snowflake,
        requests: Vec<CheckListItemRequest>,
    ) -> ServiceResult<Vec<CheckListItem>> {
        let in_club: HashSet<Snowflake> = self
            .ctx
            .club_member_repo()
            .find_by_club(club_id)
            .await?
            .into_iter()
            .map(|row| row.id)
            .collect();

        let mut items = Vec::with_capacity(requests.len());
        for request in requests {
            let category = request.parsed_category()?;
            let item_id = self.ctx.generate_id();

            let mut assigns = Vec::with_capacity(request.assigns.len());
            let mut assigned = HashSet::with_capacity(request.assigns.len());
            for assign in request.assigns {
                if !in_club.contains(&assign.club_member_id) {
                    return Err(DomainError::ClubMemberNotInClub(assign.club_member_id).into());
                }
                if !assigned.insert(assign.club_member_id) {
                    return Err(DomainError::DuplicateAssignee(assign.club_member_id).into());
                }
                assigns.push(ItemAssign {
                    id: self.ctx.generate_id(),
                    item_id,
                    club_member_id: assign.club_member_id,
                    is_checked: assign.is_checked,
                });
            }

            items.push(CheckListItem {
                id: item_id,
                checklist_id,
                content: request.content,
                category,
                sequence: request.sequence,
                is_checked: request.is_checked,
                assigns,
            });
        }

        Ok(items)
    }

    /// Attach a checklist to a schedule that has none
    #[instrument(skip(self, request))]
    pub async fn create_checklist(
        &self,
        schedule_id: Snowflake,
        actor: Snowflake,
        request: CheckListRequest,
    ) -> ServiceResult<CheckListResponse> {
        request.validate()?;

        let auth = AuthorizationChecker::new(self.ctx);
        let (schedule, _) = auth.require_schedule_manager(schedule_id, actor).await?;
        if schedule.has_checklist() {
            return Err(DomainError::CheckListAlreadyExists.into());
        }

        let checklist_id = self.ctx.generate_id();
        let items = self.build_items(checklist_id, schedule.club_id, request.items).await?;
        let checklist = CheckList::new(checklist_id, schedule.id, items);

        self.ctx.checklist_repo().create(&checklist).await?;

        info!(
            schedule_id = %schedule_id,
            checklist_id = %checklist_id,
            items = checklist.items.len(),
            "Checklist created"
        );

        Ok(CheckListResponse::from(checklist))
    }

    #[instrument(skip(self))]
    pub async fn get_checklist(&self, checklist_id: Snowflake, actor: Snowflake) -> ServiceResult<CheckListResponse> {
        let auth = AuthorizationChecker::new(self.ctx);
        let (checklist, _) = auth.require_checklist_member(checklist_id, actor).await?;
        Ok(CheckListResponse::from(checklist))
    }

    /// Replace every item of a checklist; an empty list clears it
    #[instrument(skip(self, request))]
    pub async fn update_checklist(
        &self,
        checklist_id: Snowflake,
        actor: Snowflake,
        request: CheckListRequest,
    ) -> ServiceResult<CheckListResponse> {
        request.validate()?;

        let auth = AuthorizationChecker::new(self.ctx);
        let (mut checklist, schedule) = auth.require_checklist_manager(checklist_id, actor).await?;

        let items = self.build_items(checklist.id, schedule.club_id, request.items).await?;
        self.ctx.checklist_repo().replace_items(checklist.id, &items).await?;
        checklist.replace_items(items);

        info!(checklist_id = %checklist_id, items = checklist.items.len(), "Checklist items replaced");

        Ok(CheckListResponse::from(checklist))
    }

    /// Hard delete a checklist; its schedule stays
    #[instrument(skip(self))]
    pub async fn delete_checklist(&self, checklist_id: Snowflake, actor: Snowflake) -> ServiceResult<()> {
        let auth = AuthorizationChecker::new(self.ctx);
        auth.require_checklist_manager(checklist_id, actor).await?;

        self.ctx.checklist_repo().delete(checklist_id).await?;

        info!(checklist_id = %checklist_id, "Checklist deleted");

        Ok(())
    }

    /// Active checklists of the club's active schedules
    #[instrument(skip(self))]
    pub async fn list_club_checklists(
        &self,
        club_id: Snowflake,
        actor: Snowflake,
    ) -> ServiceResult<Vec<CheckListResponse>> {
        let auth = AuthorizationChecker::new(self.ctx);
        auth.require_club_member(club_id, actor).await?;

        let schedules = self.ctx.schedule_repo().find_by_club(club_id).await?;

        let mut checklists = Vec::new();
        for checklist_id in schedules.iter().filter(|s| s.is_active).filter_map(|s| s.checklist_id) {
            if let Some(checklist) = self.ctx.checklist_repo().find_by_id(checklist_id).await? {
                if checklist.is_active {
                    checklists.push(CheckListResponse::from(checklist));
                }
            }
        }

        Ok(checklists)
    }
}
