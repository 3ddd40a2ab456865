//! Running whole programs through Chipper's public API
use chipper::{error::Error, *};
use std::{
    ops::ControlFlow,
    time::{Duration, Instant},
};

/// Draws the glyph for `5` in the top-left corner, then spins
const DRAW_FIVE: [u8; 12] = [
    0x60, 0x00, // mov  #00, v0
    0x61, 0x00, // mov  #00, v1
    0x62, 0x05, // mov  #05, v2
    0xf2, 0x29, // font v2, I
    0xd0, 0x15, // draw #5, v0, v1
    0x12, 0x0a, // jmp  20a
];

fn expected_five() -> Screen {
    let mut screen = Screen::new();
    for (y, row) in FONT[25..30].iter().enumerate() {
        for x in 0..8 {
            if row & (0x80 >> x) != 0 {
                screen.set(x, y, true);
            }
        }
    }
    screen
}

#[test]
fn draws_a_font_glyph() -> Result<()> {
    let mut ch8 = Chip8::new(CPU::seeded(0), Pacing::default());
    ch8.cpu.load_program_bytes(&DRAW_FIVE)?;
    ch8.run_fixed(6)?;
    assert_eq!(&expected_five(), ch8.cpu.screen());
    assert_eq!(0, ch8.cpu.v()[0xf]);
    assert_eq!(0x20a, ch8.cpu.pc());
    assert_eq!(
        "####....\n#.......\n####....\n...#....\n####....\n",
        ch8.cpu
            .screen()
            .to_string()
            .lines()
            .take(5)
            .map(|line| format!("{}\n", &line[..8]))
            .collect::<String>()
    );
    Ok(())
}

#[test]
fn same_seed_same_machine() -> Result<()> {
    // rand #ff, v0; rand #ff, v1; jmp 200
    let rom = [0xc0, 0xff, 0xc1, 0xff, 0x12, 0x00];
    let mut a = Chip8::new(CPU::seeded(0xc8), Pacing::default());
    let mut b = Chip8::new(CPU::seeded(0xc8), Pacing::default());
    a.cpu.load_program_bytes(&rom)?;
    b.cpu.load_program_bytes(&rom)?;
    a.run_fixed(30)?;
    b.run_fixed(30)?;
    assert_eq!(a.cpu, b.cpu);
    Ok(())
}

#[test]
fn run_stops_when_asked() -> Result<()> {
    let mut ch8 = Chip8::new(
        CPU::seeded(0),
        Pacing {
            instructions_per_frame: 3,
            frame_rate: 0,
        },
    );
    ch8.cpu.load_program_bytes(&DRAW_FIVE)?;
    let mut last = None;
    let mut frames = 0;
    ch8.run(&mut |screen: &Screen| {
        frames += 1;
        last = Some(screen.clone());
        match frames {
            2 => ControlFlow::Break(()),
            _ => ControlFlow::Continue(()),
        }
    })?;
    assert_eq!(6, ch8.cpu.cycle());
    assert_eq!(Some(expected_five()), last);
    Ok(())
}

#[test]
fn run_sleeps_out_each_frame() -> Result<()> {
    let mut ch8 = Chip8::new(
        CPU::seeded(0),
        Pacing {
            instructions_per_frame: 1,
            frame_rate: 500,
        },
    );
    ch8.cpu.load_program_bytes(&[0x12, 0x00])?; // jmp 200
    let mut frames = 0;
    let start = Instant::now();
    ch8.run(&mut |_: &Screen| {
        frames += 1;
        if frames < 3 {
            ControlFlow::Continue(())
        } else {
            ControlFlow::Break(())
        }
    })?;
    // two full 2ms frames are slept out before the third one stops the loop
    assert!(start.elapsed() >= Duration::from_millis(4));
    assert_eq!(3, ch8.cpu.cycle());
    Ok(())
}

#[test]
fn frames_tick_timers() -> Result<()> {
    let mut ch8 = Chip8::new(
        CPU::seeded(0),
        Pacing {
            instructions_per_frame: 4,
            frame_rate: 0,
        },
    );
    // mov #05, v0; mov v0, DT; mov v0, ST; jmp 206
    ch8.cpu
        .load_program_bytes(&[0x60, 0x05, 0xf0, 0x15, 0xf0, 0x18, 0x12, 0x06])?;
    let mut frames = 0;
    ch8.run(&mut |_: &Screen| {
        frames += 1;
        if frames < 3 {
            ControlFlow::Continue(())
        } else {
            ControlFlow::Break(())
        }
    })?;
    assert_eq!(2, ch8.cpu.delay());
    assert_eq!(2, ch8.cpu.sound());
    Ok(())
}

#[test]
fn run_reports_errors() {
    let mut ch8 = Chip8::new(CPU::seeded(0), Pacing::default());
    ch8.cpu.load_program_bytes(&[0x00, 0xee]).unwrap();
    let result = ch8.run(&mut |_: &Screen| ControlFlow::Continue(()));
    assert!(matches!(result, Err(Error::StackUnderflow { .. })));
}

#[test]
fn run_fixed_stops_at_unknown_opcode() {
    let mut ch8 = Chip8::new(CPU::seeded(0), Pacing::default());
    ch8.cpu
        .load_program_bytes(&[0x60, 0x01, 0xe0, 0x9e])
        .unwrap();
    let result = ch8.run_fixed(10);
    assert!(matches!(
        result,
        Err(Error::UnimplementedInstruction { word: 0xe09e })
    ));
    assert_eq!(1, ch8.cpu.v()[0]);
}

#[test]
fn recursion_overflows() {
    // call 200
    let mut ch8 = Chip8::new(CPU::seeded(0), Pacing::default());
    ch8.cpu.load_program_bytes(&[0x22, 0x00]).unwrap();
    let result = ch8.run_fixed(STACK_DEPTH + 1);
    assert!(matches!(
        result,
        Err(Error::StackOverflow {
            depth: STACK_DEPTH,
            ..
        })
    ));
    assert_eq!(STACK_DEPTH, ch8.cpu.stack().len());
}

#[test]
fn load_missing_rom() {
    let mut cpu = CPU::seeded(0);
    let result = cpu.load_program("this/rom/does/not/exist.ch8");
    assert!(matches!(result, Err(Error::IoError(_))));
}

#[test]
fn load_oversized_rom() {
    let mut cpu = CPU::seeded(0);
    let result = cpu.load_program_bytes(&[0; 0xe01]);
    assert!(matches!(
        result,
        Err(Error::ProgramTooLarge {
            len: 0xe01,
            max: 0xe00
        })
    ));
    assert!(cpu.load_program_bytes(&[0; 0xe00]).is_ok());
}

#[test]
fn reload_clears_old_program() -> Result<()> {
    let mut cpu = CPU::seeded(0);
    cpu.load_program_bytes(&[0xff; 16])?;
    cpu.load_program_bytes(&[0x12, 0x00])?;
    assert_eq!([0x12, 0x00, 0x00, 0x00], cpu.mem().slice(0x200..0x204)?);
    Ok(())
}
