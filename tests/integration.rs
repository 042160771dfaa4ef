//! Runs small programs through c8core's public API
use c8core::prelude::*;

fn run(program: &[u8], steps: usize) -> CPU {
    let mut cpu = CPU::default();
    cpu.load_program_bytes(program)
        .expect("Test programs should fit in memory");
    cpu.multistep(steps)
        .expect("Test programs should run without error");
    cpu
}

/// Plays back one key mask per frame, then holds the last one
struct Script(Vec<u16>);

impl Input for Script {
    fn keys(&mut self) -> u16 {
        match self.0.len() {
            0 => 0,
            1 => self.0[0],
            _ => self.0.remove(0),
        }
    }
}

#[test]
fn count_to_ten() {
    let cpu = run(
        &[
            0x60, 0x00, // 200: mov  #00, v0
            0x70, 0x01, // 202: add  #01, v0
            0x30, 0x0a, // 204: se   #0a, v0
            0x12, 0x02, // 206: jmp  202
            0x12, 0x08, // 208: jmp  208
        ],
        100,
    );
    assert_eq!(10, cpu.v()[0]);
    assert_eq!(0x208, cpu.pc());
}

#[test]
fn subroutine() {
    let cpu = run(
        &[
            0x22, 0x06, // 200: call 206
            0x62, 0x07, // 202: mov  #07, v2
            0x12, 0x04, // 204: jmp  204
            0x61, 0x05, // 206: mov  #05, v1
            0x00, 0xee, // 208: ret
        ],
        10,
    );
    assert_eq!((5, 7), (cpu.v()[1], cpu.v()[2]));
    assert_eq!(0x204, cpu.pc());
    assert!(cpu.stack().is_empty());
}

#[test]
fn runaway_recursion() {
    let mut cpu = CPU::default();
    cpu.load_program_bytes(&[0x22, 0x00]).unwrap(); // 200: call 200
    let err = cpu.multistep(100).expect_err("The stack should overflow");
    assert!(matches!(err, Error::StackOverflow { pc: 0x200 }), "{err}");
    assert_eq!(16, cpu.stack().len());
    assert_eq!(17, cpu.cycle());
}

#[test]
fn stray_return() {
    let mut cpu = CPU::default();
    cpu.load_program_bytes(&[0x00, 0xe0, 0x00, 0xee]).unwrap();
    let err = cpu.multistep(2).expect_err("The stack should underflow");
    assert!(matches!(err, Error::StackUnderflow { pc: 0x202 }), "{err}");
}

#[test]
fn draw_digits() {
    let mut program = vec![];
    // draw digits 0..=f in a row, 4 pixels apart
    for digit in 0..16u8 {
        program.extend_from_slice(&[
            0x60, digit,     // mov  #digit, v0
            0x61, digit * 4, // mov  #(digit*4), v1
            0xf0, 0x29,      // font v0, I
            0xd1, 0x25,      // draw #5, v1, v2
        ]);
    }
    program.extend_from_slice(&[0x12, 0x80]); // jmp 280
    let cpu = run(&program, 16 * 4 + 1);

    // every font row is 4 pixels wide, so no two digits overlap
    assert_eq!(0, cpu.v()[0xf]);
    let lit = (0..32)
        .flat_map(|y| (0..64).map(move |x| (x, y)))
        .filter(|&(x, y)| cpu.screen().pixel(x, y))
        .count();
    let expected: u32 = c8core::mem::FONT.iter().map(|row| row.count_ones()).sum();
    assert_eq!(expected as usize, lit);

    let shown = cpu.screen().to_string();
    assert_eq!(32, shown.lines().count());
    assert_eq!(lit, shown.matches("██").count());
}

#[test]
fn wait_for_key_release() {
    let mut cpu = CPU::default();
    cpu.load_program_bytes(&[
        0xf3, 0x0a, // 200: waitk v3
        0x12, 0x02, // 202: jmp   202
    ])
    .unwrap();
    let mut keys = Script(vec![0, 0x0100, 0x0100, 0x0100, 0]);

    for _ in 0..4 {
        cpu.frame(&mut keys, &mut Silent).unwrap();
        assert!(cpu.state().is_waiting());
    }
    cpu.frame(&mut keys, &mut Silent).unwrap();
    assert_eq!(State::Running, cpu.state());
    assert_eq!(8, cpu.v()[3]);
}

#[test]
fn wait_for_key_held_from_the_start() {
    let mut cpu = CPU::default();
    cpu.load_program_bytes(&[
        0xf3, 0x0a, // 200: waitk v3
        0x12, 0x02, // 202: jmp   202
    ])
    .unwrap();
    // key 4 is already down when Fx0A runs
    let mut keys = Script(vec![0x0010, 0x0010, 0x0010, 0]);

    for _ in 0..3 {
        cpu.frame(&mut keys, &mut Silent).unwrap();
        assert!(cpu.state().is_waiting());
        assert_eq!(0, cpu.v()[3]);
    }
    cpu.frame(&mut keys, &mut Silent).unwrap();
    assert_eq!(State::Running, cpu.state());
    assert_eq!(4, cpu.v()[3]);
}

#[test]
fn delay_timer_counts_frames() {
    let mut cpu = CPU::default();
    cpu.load_program_bytes(&[
        0x60, 0x1e, // 200: mov   #1e, v0
        0xf0, 0x15, // 202: mov   v0, DT
        0xf1, 0x07, // 204: mov   DT, v1
        0x31, 0x00, // 206: se    #00, v1
        0x12, 0x04, // 208: jmp   204
        0x12, 0x0a, // 20a: jmp   20a
    ])
    .unwrap();
    for _ in 0..29 {
        cpu.frame(&mut 0u16, &mut Silent).unwrap();
    }
    assert_eq!(1, cpu.delay());
    assert_ne!(0x20a, cpu.pc());
    for _ in 0..2 {
        cpu.frame(&mut 0u16, &mut Silent).unwrap();
    }
    assert_eq!(0, cpu.delay());
    assert_eq!(0x20a, cpu.pc());
}

#[test]
fn sound_timer_beeps() {
    let mut cpu = CPU::default();
    cpu.load_program_bytes(&[
        0x60, 0x05, // 200: mov   #05, v0
        0xf0, 0x18, // 202: mov   v0, ST
        0x12, 0x04, // 204: jmp   204
    ])
    .unwrap();
    let mut beeps = 0usize;
    for _ in 0..10 {
        cpu.frame(&mut 0u16, &mut beeps).unwrap();
    }
    assert_eq!(5, beeps);
    assert_eq!(0, cpu.sound());
}

#[test]
fn shift_quirk() {
    let program = [
        0x61, 0x10, // 200: mov   #10, v1
        0x62, 0x03, // 202: mov   #03, v2
        0x81, 0x26, // 204: shr   v2, v1
    ];
    let mut chip8 = CPU::new(Flags::with_mode(Mode::Chip8));
    chip8.load_program_bytes(&program).unwrap().multistep(3).unwrap();
    assert_eq!((0x08, 0), (chip8.v()[1], chip8.v()[0xf]));

    let mut vip = CPU::new(Flags::with_mode(Mode::Vip));
    vip.load_program_bytes(&program).unwrap().multistep(3).unwrap();
    assert_eq!((0x01, 1), (vip.v()[1], vip.v()[0xf]));
}

#[test]
fn load_program_from_disk() {
    let path = std::env::temp_dir().join(format!("c8core-{}.ch8", std::process::id()));
    std::fs::write(&path, [0x6a, 0x42]).unwrap();

    let mut cpu = CPU::default();
    let result = cpu.load_program(&path).and_then(|cpu| cpu.multistep(1).map(|_| ()));
    std::fs::remove_file(&path).ok();

    result.unwrap();
    assert_eq!(0x42, cpu.v()[0xa]);
}

#[test]
fn load_program_missing() {
    let err = CPU::default()
        .load_program("this/rom/does/not/exist.ch8")
        .map(|_| ())
        .expect_err("The ROM doesn't exist");
    assert!(matches!(err, Error::IoError(_)), "{err}");
}
