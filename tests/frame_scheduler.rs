mod tests {
    use myrtio_light_programs::color::{Rgb, WHITE};
    use myrtio_light_programs::{
        CellRange, Command, CommandQueue, Duration, FrameScheduler, Instant, LightConfig,
        LightRegistry, OutputDriver, OutputFilterConfig, SplitMix,
    };

    const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };
    const GREEN: Rgb = Rgb { r: 0, g: 255, b: 0 };

    #[derive(Default)]
    struct RecordingDriver {
        frames: Vec<Vec<Rgb>>,
    }

    impl OutputDriver for RecordingDriver {
        fn write(&mut self, colors: &[Rgb]) {
            self.frames.push(colors.to_vec());
        }
    }

    type Scheduler<'a> = FrameScheduler<'a, RecordingDriver, SplitMix, 4, 2, 4>;

    const UNFILTERED: OutputFilterConfig = OutputFilterConfig {
        brightness: 255,
        color_correction: WHITE,
    };

    fn registry(color: Rgb) -> LightRegistry<SplitMix, 4, 2> {
        let mut registry = LightRegistry::new(SplitMix::new(9));
        registry
            .register(&LightConfig::new("desk", CellRange::new(0, 4)).with_color(color))
            .unwrap();
        registry
    }

    fn ms(millis: u64) -> Instant {
        Instant::from_millis(millis)
    }

    #[test]
    fn test_tick_writes_frame() {
        let mut scheduler = Scheduler::new(registry(RED), RecordingDriver::default(), &UNFILTERED);
        let result = scheduler.tick(ms(0));

        assert_eq!(result.applied_commands, 0);
        assert_eq!(scheduler.output().frames, vec![vec![RED; 4]]);
        assert_eq!(scheduler.registry().get("desk").unwrap().tick_count(), 1);
    }

    #[test]
    fn test_filter_scales_output_only() {
        let mut scheduler = Scheduler::new(
            registry(RED),
            RecordingDriver::default(),
            &OutputFilterConfig::default(),
        );
        scheduler.tick(ms(0));

        assert_eq!(scheduler.output().frames[0], vec![Rgb::new(128, 0, 0); 4]);
        assert!(scheduler.registry().frame().iter().all(|cell| *cell == RED));
    }

    #[test]
    fn test_color_correction() {
        let config = OutputFilterConfig {
            brightness: 255,
            color_correction: Rgb::new(255, 0, 255),
        };
        let mut scheduler = Scheduler::new(registry(WHITE), RecordingDriver::default(), &config);
        scheduler.tick(ms(0));
        assert_eq!(scheduler.output().frames[0][0], Rgb::new(255, 0, 255));

        scheduler.filter_mut().set_color_correction(WHITE);
        scheduler.filter_mut().set_brightness(0);
        scheduler.tick(ms(16));
        assert_eq!(scheduler.output().frames[1][0], Rgb::new(0, 0, 0));
    }

    #[test]
    fn test_frame_pacing() {
        let mut scheduler = Scheduler::new(registry(RED), RecordingDriver::default(), &UNFILTERED)
            .with_frame_duration(Duration::from_millis(10));

        let result = scheduler.tick(ms(0));
        assert_eq!(result.next_deadline.as_millis(), 10);
        assert_eq!(result.sleep_duration.as_millis(), 10);

        let result = scheduler.tick(ms(5));
        assert_eq!(result.next_deadline.as_millis(), 20);
        assert_eq!(result.sleep_duration.as_millis(), 15);

        // Behind schedule, but within the allowed drift
        let result = scheduler.tick(ms(35));
        assert_eq!(result.next_deadline.as_millis(), 30);
        assert_eq!(result.sleep_duration.as_millis(), 0);

        // Long stall resets the schedule
        let result = scheduler.tick(ms(200));
        assert_eq!(result.next_deadline.as_millis(), 210);
        assert_eq!(result.sleep_duration.as_millis(), 10);
    }

    #[test]
    fn test_commands_are_applied_before_render() {
        let queue: CommandQueue<4> = CommandQueue::new();
        let mut scheduler = Scheduler::new(registry(RED), RecordingDriver::default(), &UNFILTERED)
            .with_commands(queue.receiver());

        let sender = queue.sender();
        sender.send_to("desk", Command::TurnOn).unwrap();
        sender.send_to("desk", Command::SetRgb(GREEN)).unwrap();
        sender.send_to("lamp", Command::TurnOn).unwrap();

        let result = scheduler.tick(ms(0));
        assert_eq!(result.applied_commands, 2);
        assert!(queue.is_empty());
        assert!(scheduler.registry().get("desk").unwrap().is_on());
        assert_eq!(scheduler.output().frames.last(), Some(&vec![GREEN; 4]));

        scheduler.registry_mut().light("desk").unwrap().set_color(RED);
        scheduler.tick(ms(16));
        assert_eq!(scheduler.output().frames.last(), Some(&vec![RED; 4]));
    }
}
