//! Argentine line-up of the day, with a hint budget

use crate::{api::payload::TeamPayload, session::Rules};

use super::{Setup, team};

pub(super) fn setup(payload: TeamPayload) -> Setup {
    let rules = Rules {
        hints: Some(payload.hints),
        ..Rules::reveal_all()
    };
    team::setup(payload, rules, true)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use crate::{
        api::{ImageResolver, SessionPayload},
        game_type::GameType,
        session::{Session, Victory},
        variants::{Details, Setup, fixtures},
    };

    #[test]
    fn test_setup_grants_hints() {
        let setup = Setup::from(SessionPayload::NationalTeam(fixtures::team(3)));
        assert_eq!(setup.rules.hints, Some(3));
        assert_eq!(setup.rules.victory, Victory::AllRevealed);
        assert_eq!(setup.rules.lives, None);
        assert_eq!(setup.rules.time_limit, None);
        assert_eq!(setup.items.len(), 11);
        assert_eq!(setup.items[0].name, "Jorge Broun");
        assert_eq!(setup.items[0].category, "PO");
        assert!(setup.target.is_none());
        let Details::Team(details) = &setup.details else {
            panic!("expected team details");
        };
        assert_eq!(details.title(), "Equipo Nacional del Día");
        assert_eq!(details.scheme().lines(), [3, 4, 3]);
        assert_eq!(details.surname(8), Some("Ruben"));
    }

    #[test]
    fn test_render_hides_unrevealed_players() {
        let (mut session, ticket) = Session::mount(GameType::NationalTeam);
        session.receive_session(
            ticket.generation,
            Ok(SessionPayload::NationalTeam(fixtures::team(3))),
            |_, _| {},
        );
        let game = session.game().unwrap();
        let images = ImageResolver::new("http://localhost:8000");
        let mut out = String::new();
        game.details().render(game, &images, &mut out).unwrap();

        assert!(out.contains("ESQUEMA = 3-4-3"));
        assert!(out.contains("Progreso: 0 / 11"));
        assert!(out.contains("Pistas: 0 / 3"));
        assert!(!out.contains("Broun"));
        let delanteros = out.find("Delanteros").unwrap();
        let portero = out.find("Portero").unwrap();
        assert!(delanteros < portero);
        assert!(out.contains("Delanteros (3)"));
        assert!(out.contains("Mediocampistas (4)"));
        assert!(out.contains("Portero (1)"));
    }

    #[test]
    fn test_unreadable_scheme_falls_back_to_default() {
        let mut payload = fixtures::team(3);
        payload.scheme = "4-x-2".to_owned();
        let setup = Setup::from(SessionPayload::NationalTeam(payload));
        let Details::Team(details) = &setup.details else {
            panic!("expected team details");
        };
        assert_eq!(details.scheme().to_string(), "3-4-3");

        let mut payload = fixtures::team(3);
        payload.scheme = "4-2-3-1".to_owned();
        let setup = Setup::from(SessionPayload::NationalTeam(payload));
        let Details::Team(details) = &setup.details else {
            panic!("expected team details");
        };
        assert_eq!(details.scheme().lines(), [4, 2, 3, 1]);
    }
}
