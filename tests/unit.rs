mod tests {
    use myrtio_light_programs::color::{BLACK, Rgb, WHITE};
    use myrtio_light_programs::{
        CellRange, FadeConfig, LightConfig, LightError, LightRegistry, LightUnit, ProgramId,
        SplitMix,
    };

    const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };
    const GREEN: Rgb = Rgb { r: 0, g: 255, b: 0 };

    type Registry = LightRegistry<SplitMix, 10, 4>;

    fn registry_with(config: &LightConfig<'_>) -> Registry {
        let mut registry = Registry::new(SplitMix::new(1));
        registry.register(config).unwrap();
        registry
    }

    fn desk() -> LightConfig<'static> {
        LightConfig::new("desk", CellRange::new(0, 10))
    }

    fn unit(registry: &Registry) -> &LightUnit {
        registry.get("desk").unwrap()
    }

    #[test]
    fn test_new_light_starts_off() {
        let registry = registry_with(&desk());
        let light = unit(&registry);

        assert_eq!(light.name(), "desk");
        assert!(!light.is_on());
        assert_eq!(light.program(), ProgramId::Solid);
        assert_eq!(light.tick_count(), 0);
        assert_eq!(light.get_rgb(), WHITE);
        assert_eq!(light.params().as_array(), [0, 0, 0]);
    }

    #[test]
    fn test_configured_program_gets_defaults() {
        let registry = registry_with(&desk().with_program(ProgramId::Chase));
        assert_eq!(unit(&registry).params().as_array(), [0, 35, 0]);
    }

    #[test]
    fn test_name_too_long() {
        let config = LightConfig::new("a-very-long-light-name", CellRange::new(0, 1));
        assert_eq!(LightUnit::new(&config).unwrap_err(), LightError::NameTooLong);
    }

    #[test]
    fn test_solid_scenario() {
        let mut registry = registry_with(&desk().with_color(RED));
        registry.update_all();

        assert!(registry.frame().iter().all(|cell| *cell == RED));
        assert_eq!(unit(&registry).tick_count(), 1);
    }

    #[test]
    fn test_turn_on_fades_in_then_holds() {
        let fade = FadeConfig {
            fade_in: Some(64),
            fade_out: None,
        };
        let mut registry = registry_with(&desk().with_fade(fade));

        registry.light("desk").unwrap().turn_on();
        assert!(unit(&registry).is_on());
        assert_eq!(unit(&registry).program(), ProgramId::FadeIn);
        assert_eq!(registry.frame()[0], Rgb::new(64, 64, 64));

        let mut previous = registry.frame()[0].r;
        let mut ticks = 0;
        while unit(&registry).program() == ProgramId::FadeIn {
            registry.update_all();
            let current = registry.frame()[0].r;
            assert!(current > previous);
            previous = current;
            ticks += 1;
            assert!(ticks < 64);
        }

        assert_eq!(unit(&registry).program(), ProgramId::Solid);
        assert!(registry.frame().iter().all(|cell| *cell == WHITE));
    }

    #[test]
    fn test_turn_on_without_fade() {
        let mut registry = registry_with(&desk().with_program(ProgramId::Chase));
        registry.light("desk").unwrap().turn_on();

        let light = unit(&registry);
        assert!(light.is_on());
        assert_eq!(light.program(), ProgramId::Chase);
        assert_eq!(light.tick_count(), 1);
    }

    #[test]
    fn test_turn_off_when_off_is_noop() {
        let mut registry = registry_with(
            &desk()
                .with_program(ProgramId::Chase)
                .with_fade(FadeConfig::default_fades()),
        );

        registry.light("desk").unwrap().turn_off();
        registry.light("desk").unwrap().turn_off();

        let light = unit(&registry);
        assert!(!light.is_on());
        assert_eq!(light.program(), ProgramId::Chase);
        assert_eq!(light.tick_count(), 0);
        assert!(registry.frame().iter().all(|cell| *cell == BLACK));
    }

    #[test]
    fn test_turn_off_without_fade() {
        let mut registry = registry_with(&desk().with_color(RED));
        registry.light("desk").unwrap().turn_on();
        registry.light("desk").unwrap().turn_off();

        let light = unit(&registry);
        assert!(!light.is_on());
        assert_eq!(light.program(), ProgramId::Solid);
        assert_eq!(light.tick_count(), 2);
    }

    #[test]
    fn test_turn_off_fades_out_then_powers_off() {
        let fade = FadeConfig {
            fade_in: None,
            fade_out: Some(128),
        };
        let mut registry = registry_with(&desk().with_color(RED).with_fade(fade));
        registry.light("desk").unwrap().turn_on();
        assert!(registry.frame().iter().all(|cell| *cell == RED));

        registry.light("desk").unwrap().turn_off();
        assert!(unit(&registry).is_on());
        assert_eq!(unit(&registry).program(), ProgramId::FadeOut);
        assert_eq!(registry.frame()[0], Rgb::new(127, 0, 0));

        let mut ticks = 0;
        while unit(&registry).is_on() {
            registry.update_all();
            ticks += 1;
            assert!(ticks < 32);
        }
        assert!(registry.frame().iter().all(|cell| *cell == BLACK));
        assert_eq!(unit(&registry).program(), ProgramId::FadeOut);
    }

    #[test]
    fn test_turn_on_after_fade_out() {
        let fade = FadeConfig {
            fade_in: None,
            fade_out: Some(255),
        };
        let mut registry = registry_with(&desk().with_color(RED).with_fade(fade));
        registry.light("desk").unwrap().turn_on();
        registry.light("desk").unwrap().turn_off();
        for _ in 0..5 {
            registry.update_all();
        }
        assert!(!unit(&registry).is_on());
        assert!(registry.frame().iter().all(|cell| *cell == BLACK));

        registry.light("desk").unwrap().turn_on();
        assert!(unit(&registry).is_on());
        assert_eq!(unit(&registry).program(), ProgramId::Solid);

        registry.update_all();
        assert!(unit(&registry).is_on());
        assert!(registry.frame().iter().all(|cell| *cell == RED));
    }

    #[test]
    fn test_turn_on_after_long_fade() {
        let mut registry = registry_with(&desk().with_color(RED));
        let mut light = registry.light("desk").unwrap();
        light.turn_on();
        assert!(light.set_program("long_fade"));
        while light.unit().is_on() {
            light.update();
            assert!(light.unit().tick_count() < 4000);
        }

        light.turn_on();
        assert!(light.unit().is_on());
        assert_eq!(light.unit().program(), ProgramId::Solid);
    }

    #[test]
    fn test_power_flag_does_not_gate_rendering() {
        let mut registry = registry_with(&desk().with_color(RED));
        registry.light("desk").unwrap().turn_on();
        registry.light("desk").unwrap().turn_off();
        for _ in 0..10 {
            registry.update_all();
        }

        assert!(!unit(&registry).is_on());
        assert!(registry.frame().iter().all(|cell| *cell == RED));
    }

    #[test]
    fn test_flash_draws_white_then_black() {
        let mut registry = registry_with(&desk().with_color(RED));
        registry.update_all();

        registry.light("desk").unwrap().flash();
        assert!(unit(&registry).is_flashing());
        assert!(registry.frame().iter().all(|cell| *cell == RED));

        registry.update_all();
        assert!(registry.frame().iter().all(|cell| *cell == WHITE));

        registry.update_all();
        assert!(registry.frame().iter().all(|cell| *cell == BLACK));
        assert!(!unit(&registry).is_flashing());

        registry.update_all();
        assert!(registry.frame().iter().all(|cell| *cell == RED));
        assert_eq!(unit(&registry).program(), ProgramId::Solid);
        assert_eq!(unit(&registry).tick_count(), 4);
    }

    #[test]
    fn test_toggle() {
        let mut registry = registry_with(&desk());

        registry.light("desk").unwrap().toggle();
        assert!(unit(&registry).is_on());

        registry.light("desk").unwrap().toggle();
        assert!(!unit(&registry).is_on());
    }

    #[test]
    fn test_set_on_does_not_tick() {
        let mut registry = registry_with(&desk().with_program(ProgramId::Blink));
        registry.light("desk").unwrap().set_on(true);

        let light = unit(&registry);
        assert!(light.is_on());
        assert_eq!(light.program(), ProgramId::Blink);
        assert_eq!(light.tick_count(), 0);
    }

    #[test]
    fn test_blink_scenario() {
        let mut registry = registry_with(&desk().with_color(RED).with_program(ProgramId::Blink));

        for tick in 0..=50u32 {
            registry.update_all();
            let flashed = registry.frame().iter().all(|cell| *cell == RED);
            assert_eq!(flashed, matches!(tick, 0 | 25 | 50), "tick {tick}");
        }
    }

    #[test]
    fn test_reversed_chase() {
        let config = LightConfig::new("shelf", CellRange::new(2, 4).with_reversed())
            .with_color(GREEN)
            .with_program(ProgramId::Chase);
        let mut registry = Registry::new(SplitMix::new(1));
        registry.register(&config).unwrap();
        registry.light("shelf").unwrap().set_param(1, 255).unwrap();

        registry.update_all();
        let lit: Vec<usize> = (0..10).filter(|i| registry.frame()[*i] != BLACK).collect();
        assert_eq!(lit, vec![5]);
    }

    #[test]
    fn test_unknown_program_is_ignored() {
        let mut registry = registry_with(&desk());
        let mut light = registry.light("desk").unwrap();

        assert!(light.set_program("chase"));
        assert!(!light.set_program("disco"));
        assert_eq!(light.unit().program(), ProgramId::Chase);
        assert_eq!(light.unit().params().as_array(), [0, 35, 0]);
    }

    #[test]
    fn test_program_defaults_keep_configured_values() {
        let mut registry = registry_with(&desk());
        let mut light = registry.light("desk").unwrap();

        light.set_param(1, 10).unwrap();
        assert!(light.set_program("chase"));
        assert_eq!(light.get_param(1), Ok(10));

        assert!(light.set_program("warm"));
        assert_eq!(light.unit().params().as_array(), [50, 10, 0]);
    }

    #[test]
    fn test_param_index_out_of_range() {
        let mut registry = registry_with(&desk());
        let mut light = registry.light("desk").unwrap();

        assert_eq!(
            light.set_param(3, 1),
            Err(LightError::InvalidParameter { index: 3 })
        );
        assert_eq!(
            light.get_param(7),
            Err(LightError::InvalidParameter { index: 7 })
        );
        assert_eq!(light.unit().params().as_array(), [0, 0, 0]);
    }

    #[test]
    fn test_set_params() {
        let mut registry = registry_with(&desk());
        let mut light = registry.light("desk").unwrap();

        light.set_params(&[4, 5]).unwrap();
        assert_eq!(light.unit().params().as_array(), [4, 5, 0]);

        assert_eq!(
            light.set_params(&[1, 2, 3, 4]),
            Err(LightError::InvalidParameter { index: 3 })
        );
        assert_eq!(light.unit().params().as_array(), [4, 5, 0]);

        light.set_params(&[]).unwrap();
        assert_eq!(light.unit().params().as_array(), [4, 5, 0]);
    }

    #[test]
    fn test_brightness_is_clamped() {
        let mut registry = registry_with(&desk().with_color(RED));
        let mut light = registry.light("desk").unwrap();

        light.set_brightness(250);
        assert_eq!(light.unit().get_rgb(), Rgb::new(100, 0, 0));

        light.set_brightness(-3);
        assert_eq!(light.unit().get_rgb(), BLACK);
    }

    #[test]
    fn test_saturation_is_clamped() {
        let mut registry = registry_with(&desk().with_color(RED));
        let mut light = registry.light("desk").unwrap();

        light.set_saturation(500);
        assert_eq!(light.unit().get_rgb(), Rgb::new(255, 155, 155));

        light.set_color(RED);
        light.set_saturation(-20);
        assert_eq!(light.unit().get_rgb(), WHITE);
    }

    #[test]
    fn test_hue_wraps() {
        let mut registry = registry_with(&desk().with_color(RED));
        let mut light = registry.light("desk").unwrap();

        light.set_hue(85 + 256);
        assert_eq!(light.unit().get_rgb(), GREEN);

        light.set_hue(-256);
        assert_eq!(light.unit().get_rgb(), RED);
    }

    #[test]
    fn test_color_setters() {
        let mut registry = registry_with(&desk().with_program(ProgramId::Chase));
        let mut light = registry.light("desk").unwrap();

        light.set_hsv(0, 0, 80);
        assert_eq!(light.unit().get_rgb(), Rgb::new(80, 80, 80));

        light.set_color_temperature(6600);
        assert_eq!(light.unit().get_rgb(), WHITE);

        light.set_color(RED);
        let hsv = light.unit().get_hsv();
        assert_eq!((hsv.hue, hsv.sat, hsv.val), (0, 255, 255));

        assert!(!light.unit().is_on());
        assert_eq!(light.unit().program(), ProgramId::Chase);
        assert_eq!(light.unit().tick_count(), 0);
    }

    #[test]
    fn test_set_fade() {
        let mut unit = LightUnit::new(&desk()).unwrap();
        assert_eq!(unit.fade(), FadeConfig::DISABLED);

        unit.set_fade(FadeConfig::uniform(20));
        assert_eq!(unit.fade().fade_in, Some(20));
        assert_eq!(unit.fade().fade_out, Some(20));
    }
}
