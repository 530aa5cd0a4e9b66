use std::collections::VecDeque;
use std::io::{self, Read};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tetris_lib::platform::{Command, InputSource};

// Terminal settings captured before switching to raw mode.
#[cfg(unix)]
static ORIGINAL_TERMIOS: Mutex<Option<libc::termios>> = Mutex::new(None);

const ESC: u8 = 27;
// Keys kept while the game loop is busy (for example during a cue); older ones are dropped.
const MAX_PENDING: usize = 3;
// Empty reads tolerated after ESC before it counts as a lone key press.
const ESCAPE_RETRIES: u32 = 5;
const ESCAPE_WAIT: Duration = Duration::from_millis(5);

#[cfg(unix)]
pub fn enable_raw_mode() -> io::Result<()> {
    use std::os::unix::io::AsRawFd;
    let fd = io::stdin().as_raw_fd();
    unsafe {
        let mut termios: libc::termios = std::mem::zeroed();
        if libc::tcgetattr(fd, &mut termios) != 0 {
            return Err(io::Error::last_os_error());
        }
        if let Ok(mut original) = ORIGINAL_TERMIOS.lock() {
            *original = Some(termios);
        }

        // No line buffering, no echo, reads return immediately.
        termios.c_lflag &= !(libc::ICANON | libc::ECHO);
        termios.c_cc[libc::VMIN] = 0;
        termios.c_cc[libc::VTIME] = 0;
        if libc::tcsetattr(fd, libc::TCSANOW, &termios) != 0 {
            return Err(io::Error::last_os_error());
        }

        let flags = libc::fcntl(fd, libc::F_GETFL);
        if flags < 0 || libc::fcntl(fd, libc::F_SETFL, flags | libc::O_NONBLOCK) < 0 {
            return Err(io::Error::last_os_error());
        }
    }
    Ok(())
}

#[cfg(unix)]
pub fn restore_terminal() {
    use std::os::unix::io::AsRawFd;
    let Some(original) = ORIGINAL_TERMIOS.lock().ok().and_then(|guard| *guard) else {
        return;
    };
    let fd = io::stdin().as_raw_fd();
    unsafe {
        libc::tcsetattr(fd, libc::TCSANOW, &original);
        let flags = libc::fcntl(fd, libc::F_GETFL);
        libc::fcntl(fd, libc::F_SETFL, flags & !libc::O_NONBLOCK);
    }
}

#[cfg(not(unix))]
pub fn enable_raw_mode() -> io::Result<()> {
    Ok(())
}

#[cfg(not(unix))]
pub fn restore_terminal() {}

/// Maps one key press (a byte, or an escape sequence) to a command.
pub fn decode_key(bytes: &[u8]) -> Option<Command> {
    match bytes {
        [ESC, b'[', b'A'] => Some(Command::Rotate),
        [ESC, b'[', b'B'] => Some(Command::SoftDrop),
        [ESC, b'[', b'C'] => Some(Command::MoveRight),
        [ESC, b'[', b'D'] => Some(Command::MoveLeft),
        [ESC] => Some(Command::Quit),
        [b' '] => Some(Command::Rotate),
        [b'\n'] | [b'\r'] => Some(Command::HardDrop),
        [b'p'] | [b'P'] => Some(Command::Pause),
        [b'r'] | [b'R'] => Some(Command::Restart),
        [b'q'] | [b'Q'] => Some(Command::Quit),
        [b'd'] | [b'D'] => Some(Command::ToggleDebug),
        [b'h'] | [b'H'] => Some(Command::ToggleHelp),
        [b's'] | [b'S'] => Some(Command::ToggleStatistics),
        _ => None,
    }
}

/// Keyboard reader running on its own thread; commands queue up until polled.
pub struct ConsoleController {
    pending: Arc<Mutex<VecDeque<Command>>>,
    _input_thread: std::thread::JoinHandle<()>,
}

impl ConsoleController {
    pub fn new() -> Self {
        let pending = Arc::new(Mutex::new(VecDeque::new()));
        let queue = pending.clone();

        let input_thread = std::thread::spawn(move || {
            let mut stdin = io::stdin();
            loop {
                if let Some(command) = read_key(&mut stdin, ESCAPE_RETRIES) {
                    log::trace!("key: {command:?}");
                    match queue.lock() {
                        Ok(mut queue) => enqueue(&mut queue, command),
                        Err(_) => return,
                    }
                }
                std::thread::sleep(Duration::from_millis(10));
            }
        });

        Self {
            pending,
            _input_thread: input_thread,
        }
    }
}

fn enqueue(queue: &mut VecDeque<Command>, command: Command) {
    if queue.len() >= MAX_PENDING {
        queue.pop_front();
    }
    queue.push_back(command);
}

/// Reads one key press from a non-blocking `input`.
///
/// Arrow keys arrive as ESC [ A..D, possibly split over several reads; ESC only
/// decodes on its own once `retries` empty reads passed without the rest.
fn read_key(input: &mut impl Read, retries: u32) -> Option<Command> {
    let mut key = [0u8; 3];
    match input.read(&mut key[..1]) {
        Ok(1) if key[0] == ESC => {
            let mut len = 1;
            let mut empty = 0;
            while len < key.len() && empty < retries {
                match input.read(&mut key[len..]) {
                    Ok(n) if n > 0 => len += n,
                    _ => {
                        empty += 1;
                        std::thread::sleep(ESCAPE_WAIT);
                    }
                }
                if len == 2 && key[1] != b'[' {
                    break;
                }
            }
            decode_key(&key[..len])
        }
        Ok(1) => decode_key(&key[..1]),
        _ => None,
    }
}

impl InputSource for ConsoleController {
    async fn poll(&mut self) -> Option<Command> {
        self.pending.lock().ok()?.pop_front()
    }
}
