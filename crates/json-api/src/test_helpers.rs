//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use parceltrack_app::{
    auth::{AdminSession, AdminUuid, MockAuthService, SessionUuid},
    context::AppContext,
    domain::{
        contact::MockContactService,
        packages::{
            MockPackagesService, TrackingId,
            records::{PackageRecord, PackageUuid, Party, TimelineEventRecord, TimelineEventUuid},
        },
    },
};
use salvo::{affix_state::inject, prelude::*};

use crate::state::State;

pub(crate) const TEST_TRACKING_ID: &str = "ESP-0123456789";

pub(crate) fn make_session() -> AdminSession {
    AdminSession {
        uuid: SessionUuid::new(),
        admin_uuid: AdminUuid::new(),
        admin_email: "ops@emilshipping.com".to_string(),
        admin_name: "Ops".to_string(),
        created_at: Timestamp::UNIX_EPOCH,
        expires_at: Timestamp::MAX,
    }
}

pub(crate) fn make_package(tracking_id: TrackingId) -> PackageRecord {
    PackageRecord {
        uuid: PackageUuid::new(),
        tracking_id,
        sender: Party {
            name: "Sam Sender".to_string(),
            email: "s@x.com".to_string(),
            address: "1 Marina, Lagos".to_string(),
            phone: "+234 800 000 0000".to_string(),
        },
        receiver: Party {
            name: "Rae Receiver".to_string(),
            email: "r@x.com".to_string(),
            address: String::new(),
            phone: String::new(),
        },
        origin: "Lagos".to_string(),
        destination: "Accra".to_string(),
        description: "Books".to_string(),
        quantity: 2,
        weight_kg: 2.5,
        total_charges: 4500,
        status: "pending".to_string(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_event(
    package: &PackageRecord,
    sequence: i64,
    status: &str,
    location: &str,
) -> TimelineEventRecord {
    TimelineEventRecord {
        uuid: TimelineEventUuid::new(),
        package_uuid: package.uuid,
        sequence,
        status: status.to_string(),
        location: location.to_string(),
        description: String::new(),
        occurred_at: Timestamp::UNIX_EPOCH,
    }
}

fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_sign_in().never();
    auth.expect_authenticate().never();
    auth.expect_sign_out().never();

    auth
}

fn strict_packages_mock() -> MockPackagesService {
    let mut packages = MockPackagesService::new();

    packages.expect_create_package().never();
    packages.expect_get_tracking().never();
    packages.expect_list_packages().never();
    packages.expect_package_stats().never();
    packages.expect_update_status().never();
    packages.expect_delete_package().never();

    packages
}

fn strict_contact_mock() -> MockContactService {
    let mut contact = MockContactService::new();

    contact.expect_submit().never();

    contact
}

fn make_state(
    packages: MockPackagesService,
    contact: MockContactService,
    auth: MockAuthService,
) -> Arc<State> {
    State::from_app_context(AppContext::new(
        Arc::new(packages),
        Arc::new(contact),
        Arc::new(auth),
    ))
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    make_state(strict_packages_mock(), strict_contact_mock(), auth)
}

pub(crate) fn service_with_auth(auth: MockAuthService, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(state_with_auth(auth))).push(route))
}

pub(crate) fn admin_service_with_auth(
    auth: MockAuthService,
    session: AdminSession,
    route: Router,
) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_auth(auth)))
            .hoop(inject(session))
            .push(route),
    )
}

/// Package routes as a signed-in admin sees them.
pub(crate) fn packages_service(packages: MockPackagesService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(make_state(
                packages,
                strict_contact_mock(),
                strict_auth_mock(),
            )))
            .hoop(inject(make_session()))
            .push(route),
    )
}

/// Package routes with no admin session.
pub(crate) fn public_packages_service(packages: MockPackagesService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(make_state(
                packages,
                strict_contact_mock(),
                strict_auth_mock(),
            )))
            .push(route),
    )
}

pub(crate) fn contact_service(contact: MockContactService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(make_state(
                strict_packages_mock(),
                contact,
                strict_auth_mock(),
            )))
            .push(route),
    )
}
