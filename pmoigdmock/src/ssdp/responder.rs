//! Boucle de réponse aux requêtes de découverte

use socket2::{Domain, Protocol, Socket, Type};
use std::io;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr, UdpSocket};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, trace, warn};

use super::{SSDP_MULTICAST_ADDR, SSDP_MULTICAST_ADDR_V6};
use crate::config::MockIgdConfig;
use crate::hooks::HookRegistry;
use crate::journal::RequestJournal;

/// Intervalle de réveil de la boucle pour observer l'annulation
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Répondeur SSDP lié à son socket UDP, pas encore démarré
pub struct DiscoveryResponder {
    socket: UdpSocket,
    local_addr: SocketAddr,
}

impl DiscoveryResponder {
    /// Lie le socket UDP de découverte décrit par `config`
    pub fn bind(config: &MockIgdConfig) -> io::Result<Self> {
        let addr = config.discovery_bind();

        let socket2 = Socket::new(Domain::for_address(addr), Type::DGRAM, Some(Protocol::UDP))?;
        socket2.set_reuse_address(true)?;
        socket2.bind(&addr.into())?;

        let socket: UdpSocket = socket2.into();
        socket.set_read_timeout(Some(POLL_INTERVAL))?;

        if config.join_multicast() {
            Self::join_multicast(&socket, addr);
        }

        let local_addr = socket.local_addr()?;
        info!("✅ SSDP discovery responder bound on {}", local_addr);

        Ok(Self { socket, local_addr })
    }

    fn join_multicast(socket: &UdpSocket, addr: SocketAddr) {
        let joined = match addr {
            SocketAddr::V4(_) => SSDP_MULTICAST_ADDR
                .parse::<Ipv4Addr>()
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))
                .and_then(|group| socket.join_multicast_v4(&group, &Ipv4Addr::UNSPECIFIED)),
            SocketAddr::V6(_) => SSDP_MULTICAST_ADDR_V6
                .parse::<Ipv6Addr>()
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))
                .and_then(|group| socket.join_multicast_v6(&group, 0)),
        };

        match joined {
            Ok(()) => debug!("SSDP: joined multicast group on {}", addr),
            Err(e) => warn!("⚠️ SSDP: failed to join multicast group on {}: {}", addr, e),
        }
    }

    /// Adresse effectivement liée
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Lance la boucle de réception dans un thread dédié.
    ///
    /// `default_reply` est envoyé quand aucun hook de découverte n'est installé.
    pub fn spawn(
        self,
        registry: Arc<HookRegistry>,
        journal: Arc<RequestJournal>,
        default_reply: String,
        token: CancellationToken,
    ) -> io::Result<JoinHandle<()>> {
        thread::Builder::new()
            .name("pmoigd-ssdp".to_string())
            .spawn(move || self.run(&registry, &journal, &default_reply, &token))
    }

    /// Boucle bloquante ; le socket est libéré à la sortie
    fn run(
        self,
        registry: &HookRegistry,
        journal: &RequestJournal,
        default_reply: &str,
        token: &CancellationToken,
    ) {
        // Les datagrammes plus longs sont tronqués (ou font sortir la boucle selon l'OS)
        let mut buf = [0u8; 8192];

        while !token.is_cancelled() {
            let (n, from) = match self.socket.recv_from(&mut buf) {
                Ok(received) => received,
                Err(e)
                    if matches!(
                        e.kind(),
                        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut
                    ) =>
                {
                    continue;
                }
                Err(e) => {
                    error!("❌ SSDP read error, discovery responder stops: {}", e);
                    break;
                }
            };

            if n == 0 {
                info!("🛑 Empty datagram from {}, discovery responder stops", from);
                break;
            }

            trace!(
                "📥 Discovery query from {}\n{}",
                from,
                String::from_utf8_lossy(&buf[..n])
            );

            // Hook relu à chaque requête
            let reply = match registry.discovery() {
                Some(hook) => hook(),
                None => default_reply.to_string(),
            };

            match self.socket.send_to(reply.as_bytes(), from) {
                Ok(_) => {
                    journal.record_discovery_reply();
                    debug!("📡 Discovery reply sent to {}", from);
                }
                Err(e) => {
                    error!("❌ Failed to send discovery reply to {}, responder stops: {}", from, e);
                    break;
                }
            }
        }

        info!("👋 SSDP discovery responder on {} stopped", self.local_addr);
    }
}
