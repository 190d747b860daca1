mod common;

use chrono::{Duration, TimeZone, Utc};
use common::{databases, insert_event, insert_organization, insert_section, insert_user};
use oaf_server::entity::{
    Attendee, AttendeePatch, Comment, Commitment, Event, EventPatch, Info, Member, Organization,
    OrganizationPatch, Section, User, UserPatch,
};
use oaf_server::sql::{build_insert, InsertStrategy};
use oaf_server::StoreError;
use serial_test::serial;

#[tokio::test]
#[serial]
async fn user_round_trip_and_existence() {
    for db in databases().await {
        assert!(!User::does_user_exist(&db, "clara").await.unwrap());
        let user = insert_user(&db, "clara", "secret", false).await;
        assert!(user.user_id > 0);
        assert!(User::does_user_exist(&db, "clara").await.unwrap());

        let mut loaded = User::with_id(user.user_id);
        loaded.get_details(&db).await.unwrap();
        assert_eq!(loaded, user);

        let by_name = User::get_by_username(&db, "clara").await.unwrap();
        assert_eq!(by_name.user_id, user.user_id);
        assert!(User::get_by_username(&db, "nobody").await.is_err());
    }
}

#[tokio::test]
#[serial]
async fn user_patch_then_update_persists() {
    for db in databases().await {
        let mut user = insert_user(&db, "jonas", "secret", false).await;
        let old_hash = user.password.clone();
        user.patch(UserPatch {
            email: Some("jonas@orchestra.example".into()),
            password: Some("better-secret".into()),
            username: Some(String::new()),
            shown_name: None,
        })
        .unwrap();
        assert_eq!(user.update(&db).await.unwrap(), 1);

        let mut loaded = User::with_id(user.user_id);
        loaded.get_details(&db).await.unwrap();
        assert_eq!(loaded.username, "jonas");
        assert_eq!(loaded.email, "jonas@orchestra.example");
        assert_ne!(loaded.password, old_hash);
        assert_eq!(loaded.salt, user.salt);
    }
}

#[tokio::test]
#[serial]
async fn organization_round_trip_patch_and_delete() {
    for db in databases().await {
        let first = insert_organization(&db, "Town Band").await;
        let second = insert_organization(&db, "Youth Choir").await;
        assert_ne!(first.organization_id, second.organization_id);

        let mut loaded = Organization::with_id(first.organization_id);
        loaded.get_details(&db).await.unwrap();
        assert_eq!(loaded, first);

        loaded.patch(OrganizationPatch {
            name: Some("Town Wind Band".into()),
            picture: Some(Vec::new()),
        });
        loaded.update(&db).await.unwrap();
        let mut reloaded = Organization::with_id(first.organization_id);
        reloaded.get_details(&db).await.unwrap();
        assert_eq!(reloaded.name, "Town Wind Band");
        assert_eq!(reloaded.picture, first.picture);

        assert_eq!(Organization::list(&db).await.unwrap().len(), 2);
        assert_eq!(Organization::delete(&db, second.organization_id).await.unwrap(), 1);
        let remaining = Organization::list(&db).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].organization_id, first.organization_id);
        assert_eq!(Organization::delete(&db, second.organization_id).await.unwrap(), 0);
    }
}

#[tokio::test]
#[serial]
async fn both_insert_strategies_return_the_generated_id() {
    for db in databases().await {
        let mut ids = Vec::new();
        for strategy in [InsertStrategy::Returning, InsertStrategy::LastInsertId] {
            let org = Organization {
                organization_id: 0,
                name: format!("{:?} Ensemble", strategy),
                picture: Vec::new(),
            };
            let id = db
                .insert_with(strategy, &build_insert(&org), Some("organization_id"), "inserting organization")
                .await
                .unwrap()
                .unwrap();
            let mut loaded = Organization::with_id(id);
            loaded.get_details(&db).await.unwrap();
            assert_eq!(loaded.name, org.name);
            ids.push(id);
        }
        assert_ne!(ids[0], ids[1]);
    }
}

#[tokio::test]
#[serial]
async fn failed_returning_insert_leaves_no_row() {
    for db in databases().await {
        let orphan = Section {
            section_id: 0,
            organization_id: 999,
            name: "Ghost".into(),
        };
        let err = db
            .insert_with(
                InsertStrategy::Returning,
                &build_insert(&orphan),
                Some("section_id"),
                "inserting section",
            )
            .await
            .unwrap_err();
        assert!(err.to_string().starts_with("error inserting section"));
        assert!(Section::list(&db, 0).await.unwrap().is_empty());
    }
}

#[tokio::test]
#[serial]
async fn missing_row_is_query_error() {
    for db in databases().await {
        let err = Organization::with_id(404).get_details(&db).await.unwrap_err();
        assert!(err.is_row_not_found());
        assert!(err.to_string().starts_with("error getting organization details"));
    }
}

#[tokio::test]
#[serial]
async fn sections_filter_by_organization() {
    for db in databases().await {
        let band = insert_organization(&db, "Band").await;
        let choir = insert_organization(&db, "Choir").await;
        let brass = insert_section(&db, band.organization_id, "Brass").await;
        insert_section(&db, band.organization_id, "Percussion").await;
        insert_section(&db, choir.organization_id, "Alto").await;

        assert_eq!(Section::list(&db, band.organization_id).await.unwrap().len(), 2);
        assert_eq!(Section::list(&db, choir.organization_id).await.unwrap().len(), 1);
        assert_eq!(Section::list(&db, 0).await.unwrap().len(), 3);

        let mut loaded = Section::with_id(brass.section_id);
        loaded.get_details(&db).await.unwrap();
        assert_eq!(loaded, brass);
    }
}

#[tokio::test]
#[serial]
async fn section_with_missing_organization_fails() {
    for db in databases().await {
        let mut orphan = Section {
            section_id: 0,
            organization_id: 999,
            name: "Ghost".into(),
        };
        let err = orphan.insert(&db).await.unwrap_err();
        assert!(matches!(err, StoreError::Query { .. }));
        assert!(Section::list(&db, 0).await.unwrap().is_empty());
    }
}

#[tokio::test]
#[serial]
async fn members_by_composite_key_and_organization() {
    for db in databases().await {
        let user = insert_user(&db, "mila", "pw", false).await;
        let other = insert_user(&db, "tom", "pw", false).await;
        let band = insert_organization(&db, "Band").await;
        let choir = insert_organization(&db, "Choir").await;
        let brass = insert_section(&db, band.organization_id, "Brass").await;
        let alto = insert_section(&db, choir.organization_id, "Alto").await;

        let mut member = Member {
            section_id: brass.section_id,
            user_id: user.user_id,
            rights: 2,
        };
        member.insert(&db).await.unwrap();
        Member {
            section_id: alto.section_id,
            user_id: other.user_id,
            rights: 0,
        }
        .insert(&db)
        .await
        .unwrap();

        let mut loaded = Member::with_key(brass.section_id, user.user_id);
        loaded.get_details(&db).await.unwrap();
        assert_eq!(loaded.rights, 2);

        loaded.rights = 5;
        loaded.update(&db).await.unwrap();
        let mut reloaded = Member::with_key(brass.section_id, user.user_id);
        reloaded.get_details(&db).await.unwrap();
        assert_eq!(reloaded.rights, 5);

        let band_members = Member::list(&db, band.organization_id).await.unwrap();
        assert_eq!(band_members.len(), 1);
        assert_eq!(band_members[0].user_id, user.user_id);
        assert_eq!(Member::list(&db, 0).await.unwrap().len(), 2);

        assert_eq!(Member::delete(&db, brass.section_id, user.user_id).await.unwrap(), 1);
        assert_eq!(Member::list(&db, 0).await.unwrap().len(), 1);
    }
}

#[tokio::test]
#[serial]
async fn event_with_null_end_round_trips_and_patches() {
    for db in databases().await {
        let creator = insert_user(&db, "lena", "pw", false).await;
        let org = insert_organization(&db, "Band").await;
        let event = insert_event(&db, org.organization_id, creator.user_id).await;
        assert!(event.event_id > 0);

        let mut loaded = Event::with_id(event.event_id);
        loaded.get_details(&db).await.unwrap();
        assert_eq!(loaded, event);
        assert!(loaded.end.is_none());

        let end = event.start + Duration::hours(2);
        loaded.patch(EventPatch {
            address: Some("Concert Hall".into()),
            end: Some(end),
            ..Default::default()
        });
        loaded.update(&db).await.unwrap();

        let mut reloaded = Event::with_id(event.event_id);
        reloaded.get_details(&db).await.unwrap();
        assert_eq!(reloaded.address.as_deref(), Some("Concert Hall"));
        assert_eq!(reloaded.end, Some(end));
        assert_eq!(reloaded.organization_id, org.organization_id);

        assert_eq!(Event::list(&db, org.organization_id).await.unwrap().len(), 1);
        assert_eq!(Event::list(&db, org.organization_id + 100).await.unwrap().len(), 0);
    }
}

#[tokio::test]
#[serial]
async fn attendee_commitment_round_trips() {
    for db in databases().await {
        let user = insert_user(&db, "paul", "pw", false).await;
        let org = insert_organization(&db, "Band").await;
        let event = insert_event(&db, org.organization_id, user.user_id).await;

        let mut attendee = Attendee {
            event_id: event.event_id,
            user_id: user.user_id,
            commitment: Commitment::Maybe,
            comment: Some("depends on the train".into()),
        };
        attendee.insert(&db).await.unwrap();

        let mut loaded = Attendee::with_key(event.event_id, user.user_id);
        loaded.get_details(&db).await.unwrap();
        assert_eq!(loaded.commitment, Commitment::Maybe);
        assert_eq!(loaded.comment.as_deref(), Some("depends on the train"));

        loaded.patch(AttendeePatch {
            commitment: Some(Commitment::Attending),
            comment: None,
        });
        loaded.update(&db).await.unwrap();
        let attendees = Attendee::list(&db, event.event_id).await.unwrap();
        assert_eq!(attendees.len(), 1);
        assert_eq!(attendees[0].commitment, Commitment::Attending);

        assert_eq!(Attendee::delete(&db, event.event_id, user.user_id).await.unwrap(), 1);
        assert!(Attendee::list(&db, event.event_id).await.unwrap().is_empty());
    }
}

#[tokio::test]
#[serial]
async fn attendee_for_missing_event_fails() {
    for db in databases().await {
        let user = insert_user(&db, "paul", "pw", false).await;
        let mut attendee = Attendee::with_key(12345, user.user_id);
        assert!(attendee.insert(&db).await.is_err());
    }
}

#[tokio::test]
#[serial]
async fn comments_are_listed_per_event() {
    for db in databases().await {
        let user = insert_user(&db, "ida", "pw", false).await;
        let org = insert_organization(&db, "Band").await;
        let concert = insert_event(&db, org.organization_id, user.user_id).await;
        let rehearsal = insert_event(&db, org.organization_id, user.user_id).await;

        let creation = Utc.with_ymd_and_hms(2024, 4, 1, 12, 0, 0).unwrap();
        let mut comment = Comment {
            comment_id: 0,
            event_id: concert.event_id,
            user_id: user.user_id,
            creation,
            comment: "Bring the black folders".into(),
        };
        comment.insert(&db).await.unwrap();
        assert!(comment.comment_id > 0);

        let mut loaded = Comment::with_id(comment.comment_id);
        loaded.get_details(&db).await.unwrap();
        assert_eq!(loaded, comment);

        assert_eq!(Comment::list(&db, concert.event_id).await.unwrap().len(), 1);
        assert!(Comment::list(&db, rehearsal.event_id).await.unwrap().is_empty());

        assert_eq!(Comment::delete(&db, comment.comment_id).await.unwrap(), 1);
        assert!(Comment::list(&db, 0).await.unwrap().is_empty());
    }
}

#[tokio::test]
#[serial]
async fn info_upsert_and_delete() {
    for db in databases().await {
        let mut motd = Info {
            key: "motd".into(),
            value: "Welcome".into(),
        };
        motd.upsert(&db).await.unwrap();
        motd.value = "Season opens in May".into();
        motd.upsert(&db).await.unwrap();

        let mut loaded = Info::with_key("motd");
        loaded.get_details(&db).await.unwrap();
        assert_eq!(loaded.value, "Season opens in May");
        assert_eq!(Info::list(&db).await.unwrap().len(), 1);

        assert_eq!(Info::delete(&db, "motd").await.unwrap(), 1);
        assert!(Info::list(&db).await.unwrap().is_empty());
    }
}

#[tokio::test]
#[serial]
async fn migrations_are_idempotent() {
    for db in databases().await {
        oaf_server::apply_migrations(&db).await.unwrap();
        db.ping().await.unwrap();
    }
}
