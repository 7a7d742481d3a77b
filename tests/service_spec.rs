use std::sync::Arc;

use planet_api::db::Database;
use planet_api::models::InvalidPlanet;
use planet_api::repository::{InMemoryPlanetRepository, PlanetRepository};
use planet_api::service::{PlanetError, PlanetService};
use speculate2::speculate;
use uuid::Uuid;

fn sqlite_repository() -> Arc<dyn PlanetRepository> {
    let db = Database::open_memory().expect("Failed to create in-memory database");
    db.migrate().expect("Failed to run migrations");
    Arc::new(db)
}

speculate! {
    before {
        let repository = Arc::new(InMemoryPlanetRepository::new());
        let service = PlanetService::new(repository.clone());
    }

    describe "create_planet" {
        it "creates a new planet" {
            let planet = service
                .create_planet("Earth", Some("Blue planet".to_string()))
                .expect("Failed to create");

            assert_eq!(planet.name(), "Earth");
            assert_eq!(planet.description(), Some("Blue planet"));
            assert!(!planet.id().is_nil());
        }

        it "rejects a duplicate name" {
            service.create_planet("Mars", None).expect("Failed to create");

            let err = service.create_planet("Mars", None).unwrap_err();
            assert!(matches!(err, PlanetError::DuplicateName(ref name) if name == "Mars"));
            assert_eq!(err.to_string(), "A planet with name 'Mars' already exists");
        }

        it "rejects a case variant of an existing name and keeps one record" {
            service.create_planet("Mars", None).expect("Failed to create");

            let err = service.create_planet("mars", None).unwrap_err();
            assert!(matches!(err, PlanetError::DuplicateName(_)));
            assert_eq!(repository.find_all().expect("Query failed").len(), 1);
        }

        it "treats Greek sigma forms as the same name" {
            service.create_planet("ΣΑΣ", None).expect("Failed to create");

            let found = service.get_planet_by_name("σασ").expect("Query failed");
            assert_eq!(found.map(|p| p.name().to_string()).as_deref(), Some("ΣΑΣ"));
            assert!(matches!(
                service.create_planet("σασ", None).unwrap_err(),
                PlanetError::DuplicateName(_)
            ));
        }

        it "rejects a blank name" {
            let err = service.create_planet("  ", None).unwrap_err();
            assert!(matches!(err, PlanetError::Invalid(InvalidPlanet::BlankName)));
            assert!(repository.find_all().expect("Query failed").is_empty());
        }

        it "rejects a name over 100 characters" {
            let err = service.create_planet(&"X".repeat(101), None).unwrap_err();
            assert!(matches!(err, PlanetError::Invalid(InvalidPlanet::NameTooLong)));
        }
    }

    describe "get_planet" {
        it "returns the planet by id" {
            let saved = service.create_planet("Jupiter", None).expect("Failed to create");

            let found = service.get_planet(saved.id()).expect("Query failed");
            assert_eq!(found.map(|p| p.name().to_string()), Some("Jupiter".to_string()));
        }

        it "returns None for non-existent id" {
            assert!(service.get_planet(Uuid::new_v4()).expect("Query failed").is_none());
        }
    }

    describe "get_planet_by_name" {
        it "finds a planet ignoring case" {
            service.create_planet("Jupiter", None).expect("Failed to create");

            let found = service.get_planet_by_name("jupiter").expect("Query failed");
            assert!(found.is_some());
        }
    }

    describe "get_all_planets" {
        it "returns all planets" {
            service.create_planet("Earth", None).expect("Failed to create");
            service.create_planet("Mars", None).expect("Failed to create");

            let names: Vec<_> = service
                .get_all_planets()
                .expect("Query failed")
                .iter()
                .map(|p| p.name().to_string())
                .collect();
            assert_eq!(names, vec!["Earth", "Mars"]);
        }

        it "returns empty list when no planets exist" {
            assert!(service.get_all_planets().expect("Query failed").is_empty());
        }
    }

    describe "update_planet" {
        it "updates an existing planet" {
            let planet = service
                .create_planet("Venus", Some("Morning star".to_string()))
                .expect("Failed to create");

            let updated = service
                .update_planet(planet.id(), "Venus", Some("Evening star".to_string()))
                .expect("Failed to update");

            assert_eq!(updated.description(), Some("Evening star"));
            let found = service.get_planet(planet.id()).expect("Query failed").expect("Planet missing");
            assert_eq!(found.description(), Some("Evening star"));
        }

        it "fails with NotFound for unknown id" {
            let id = Uuid::new_v4();

            let err = service.update_planet(id, "Nonexistent", Some("Test".to_string())).unwrap_err();
            assert!(matches!(err, PlanetError::NotFound(got) if got == id));
        }

        it "rejects renaming onto another planet's name" {
            service.create_planet("Earth", None).expect("Failed to create");
            let mars = service.create_planet("Mars", None).expect("Failed to create");

            let err = service.update_planet(mars.id(), "earth", None).unwrap_err();
            assert!(matches!(err, PlanetError::DuplicateName(_)));

            let unchanged = service.get_planet(mars.id()).expect("Query failed").expect("Planet missing");
            assert_eq!(unchanged.name(), "Mars");
        }

        it "allows re-casing a planet's own name" {
            let mars = service.create_planet("Mars", None).expect("Failed to create");

            let updated = service.update_planet(mars.id(), "MARS", None).expect("Failed to update");
            assert_eq!(updated.name(), "MARS");
            assert_eq!(updated.id(), mars.id());
        }

        it "clears the description when none is given" {
            let mars = service
                .create_planet("Mars", Some("Red planet".to_string()))
                .expect("Failed to create");

            let updated = service.update_planet(mars.id(), "Mars", None).expect("Failed to update");
            assert!(updated.description().is_none());
        }
    }

    describe "delete_planet" {
        it "removes the planet" {
            let planet = service.create_planet("Mercury", None).expect("Failed to create");

            assert!(service.delete_planet(planet.id()).expect("Delete failed"));
            assert!(service.get_planet(planet.id()).expect("Query failed").is_none());
        }

        it "returns false for non-existent planet" {
            assert!(!service.delete_planet(Uuid::new_v4()).expect("Delete failed"));
        }
    }

    describe "with sqlite storage" {
        it "enforces the same rules" {
            let service = PlanetService::new(sqlite_repository());

            let mars = service.create_planet("Mars", None).expect("Failed to create");
            assert!(matches!(
                service.create_planet("MARS", None).unwrap_err(),
                PlanetError::DuplicateName(_)
            ));
            assert!(matches!(
                service.update_planet(Uuid::new_v4(), "Pluto", None).unwrap_err(),
                PlanetError::NotFound(_)
            ));
            assert!(service.delete_planet(mars.id()).expect("Delete failed"));
            assert!(!service.delete_planet(mars.id()).expect("Delete failed"));
        }

        it "treats Greek sigma forms as the same name" {
            let service = PlanetService::new(sqlite_repository());

            service.create_planet("ΣΑΣ", None).expect("Failed to create");
            assert!(service.get_planet_by_name("σασ").expect("Query failed").is_some());
            assert!(matches!(
                service.create_planet("σασ", None).unwrap_err(),
                PlanetError::DuplicateName(_)
            ));
        }
    }
}
