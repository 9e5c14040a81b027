use std::collections::HashMap;
use std::future::Future;
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;
use actix_cors::Cors;
use actix_web::{http, web, App, HttpRequest, HttpResponse, HttpServer};
use actix_web::dev::ServerHandle;
use actix_web::http::header::ContentType;
use actix_web::web::{Data, ServiceConfig};
use bip_bencode::{ben_bytes, ben_int, ben_list, ben_map, BMutAccess};
use chrono::Utc;
use log::{info, warn};
use rand::Rng;
use crate::common::common::{parse_query, QueryValues};
use crate::http::structs::http_service_data::HttpServiceData;
use crate::stats::enums::stats_event::StatsEvent;
use crate::tracker::structs::announce_query_request::AnnounceQueryRequest;
use crate::tracker::structs::announce_result::AnnounceResult;
use crate::tracker::structs::passkey::PassKey;
use crate::tracker::structs::user_entry_item::UserEntryItem;

/// Misbehaving clients are told to back off for an hour.
const FAILURE_INTERVAL: i64 = 3600;

pub fn http_service_cors() -> Cors
{
    Cors::default()
        .send_wildcard()
        .allowed_methods(vec!["GET"])
        .allowed_headers(vec![http::header::X_FORWARDED_FOR, http::header::ACCEPT])
        .allowed_header(http::header::CONTENT_TYPE)
        .max_age(1)
}

pub fn http_service_routes(data: Arc<HttpServiceData>) -> Box<dyn Fn(&mut ServiceConfig)>
{
    Box::new(move |cfg: &mut ServiceConfig| {
        cfg.app_data(web::Data::new(data.clone()));
        cfg.service(web::resource("/stats").route(web::get().to(http_service_stats)));
        cfg.service(web::resource("/{passkey}/announce").route(web::get().to(http_service_announce)));
        cfg.service(web::resource("/{passkey}/scrape").route(web::get().to(http_service_scrape)));
        cfg.default_service(web::route().to(http_service_not_found));
    })
}

pub async fn http_service(
    addr: std::net::SocketAddr,
    data: Arc<HttpServiceData>,
    keep_alive: u64,
    client_request_timeout: u64,
    client_disconnect_timeout: u64,
    threads: u64,
) -> (ServerHandle, impl Future<Output=Result<(), std::io::Error>>)
{
    info!("[HTTP] Starting server listener on {}", addr);
    let server = HttpServer::new(move || {
        App::new()
            .wrap(http_service_cors())
            .configure(http_service_routes(data.clone()))
    })
        .keep_alive(Duration::from_secs(keep_alive))
        .client_request_timeout(Duration::from_secs(client_request_timeout))
        .client_disconnect_timeout(Duration::from_secs(client_disconnect_timeout))
        .workers(threads as usize)
        .bind((addr.ip(), addr.port()))
        .unwrap()
        .disable_signals()
        .run();

    (server.handle(), server)
}

/// Every protocol failure is an HTTP 200 with a bencoded reason and a long
/// retry interval.
pub fn http_service_failure(data: &Data<Arc<HttpServiceData>>, reason: &str) -> HttpResponse
{
    data.torrent_tracker.update_stats(StatsEvent::Failures, 1);
    HttpResponse::Ok().content_type(ContentType::plaintext()).body(ben_map! {
        "failure reason" => ben_bytes!(reason.to_string()),
        "interval" => ben_int!(FAILURE_INTERVAL),
        "min interval" => ben_int!(FAILURE_INTERVAL)
    }.encode())
}

/// Resolves the client IPv4 in the order the protocol promises: `ipv4`
/// param, `ip` param when it is an IPv4 literal, the configured real-IP
/// header, then the socket address.
pub fn http_resolve_ip(request: &HttpRequest, query: &HashMap<String, QueryValues>, real_ip_header: &str, data: &Data<Arc<HttpServiceData>>) -> Result<Ipv4Addr, HttpResponse>
{
    let mut candidate: Option<String> = query.get("ipv4")
        .and_then(|values| values.last())
        .map(|bytes| String::from_utf8_lossy(bytes).to_string());

    if candidate.is_none() {
        candidate = query.get("ip")
            .and_then(|values| values.last())
            .map(|bytes| String::from_utf8_lossy(bytes).to_string())
            .filter(|value| value.parse::<Ipv4Addr>().is_ok());
    }

    if candidate.is_none() {
        candidate = request.headers().get(real_ip_header)
            .and_then(|header| header.to_str().ok())
            .map(|value| value.to_string());
    }

    if candidate.is_none() {
        candidate = request.peer_addr().map(|peer_addr| peer_addr.ip().to_string());
    }

    let Some(address) = candidate else {
        return Err(http_service_failure(data, "Failed to parse IP address"));
    };

    match address.parse::<Ipv4Addr>() {
        Ok(ip) => Ok(ip),
        Err(_) => {
            warn!("[HTTP] Client address '{address}' did not resolve to an IPv4 address");
            Err(http_service_failure(data, "Assertion failed (client address is not IPv4), please report this issue to staff"))
        }
    }
}

/// Looks up the authenticated user, or produces the failure response to send.
pub fn http_service_user(data: &Data<Arc<HttpServiceData>>, passkey: &PassKey) -> Result<Arc<UserEntryItem>, HttpResponse>
{
    let user = match data.torrent_tracker.get_user(passkey) {
        Some(user) => user,
        None => return Err(http_service_failure(data, "Your passkey is invalid")),
    };
    if !user.enabled {
        return Err(http_service_failure(data, "Your account is disabled"));
    }
    Ok(user)
}

pub async fn http_service_announce(request: HttpRequest, path: web::Path<String>, data: Data<Arc<HttpServiceData>>) -> HttpResponse
{
    let tracker = &data.torrent_tracker;
    if tracker.terminate.load(Ordering::Relaxed) {
        return HttpResponse::Ok().finish();
    }
    tracker.update_stats(StatsEvent::Requests, 1);

    let passkey = match path.into_inner().parse::<PassKey>() {
        Ok(passkey) => passkey,
        Err(_) => return http_service_failure(&data, "Malformed request - missing passkey"),
    };

    let query_map = match parse_query(Some(request.query_string().to_string())) {
        Ok(query_map) => query_map,
        Err(_) => return http_service_failure(&data, "Error parsing query"),
    };

    let user = match http_service_user(&data, &passkey) {
        Ok(user) => user,
        Err(response) => return response,
    };

    let ip = match http_resolve_ip(&request, &query_map, &data.real_ip, &data) {
        Ok(ip) => ip,
        Err(response) => return response,
    };

    tracker.update_stats(StatsEvent::AnnouncesHandled, 1);

    let announce = match tracker.validate_announce(ip, &query_map) {
        Ok(announce) => announce,
        Err(error) => return http_service_failure(&data, &error.message),
    };

    if tracker.config.tracker_config.whitelist_enabled && !tracker.check_whitelisted_client(&announce.peer_id) {
        return http_service_failure(&data, "Your client is not approved");
    }

    let result = match tracker.handle_announce(&user, &announce) {
        Ok(result) => result,
        Err(error) => return http_service_failure(&data, &error.message),
    };

    http_service_announce_response(&data, &announce, &result)
}

pub fn http_service_announce_response(data: &Data<Arc<HttpServiceData>>, announce: &AnnounceQueryRequest, result: &AnnounceResult) -> HttpResponse
{
    let tracker_config = &data.torrent_tracker.config.tracker_config;
    let jitter = tracker_config.announce_interval_jitter;
    let interval = tracker_config.announce_interval.saturating_sub(jitter)
        + rand::thread_rng().gen_range(0..=jitter.saturating_mul(2));
    let min_interval = tracker_config.announce_interval_minimum;

    if announce.compact {
        let mut buffer = data.buffer_pool.take();
        for (peer_addr, _) in result.peers.iter() {
            buffer.extend_from_slice(&peer_addr.ip().octets());
            buffer.extend_from_slice(&peer_addr.port().to_be_bytes());
        }
        let response = HttpResponse::Ok().content_type(ContentType::plaintext()).body(ben_map! {
            "complete" => ben_int!(result.complete as i64),
            "incomplete" => ben_int!(result.incomplete as i64),
            "interval" => ben_int!(interval as i64),
            "min interval" => ben_int!(min_interval as i64),
            "peers" => ben_bytes!(buffer.to_vec())
        }.encode());
        data.buffer_pool.give(buffer);
        return response;
    }

    let mut peers_list = ben_list!();
    let peers_list_mut = peers_list.list_mut().unwrap();
    for (peer_addr, peer_id) in result.peers.iter() {
        if announce.no_peer_id {
            peers_list_mut.push(ben_map! {
                "ip" => ben_bytes!(peer_addr.ip().to_string()),
                "port" => ben_int!(peer_addr.port() as i64)
            });
        } else {
            peers_list_mut.push(ben_map! {
                "ip" => ben_bytes!(peer_addr.ip().to_string()),
                "peer id" => ben_bytes!(peer_id.0.to_vec()),
                "port" => ben_int!(peer_addr.port() as i64)
            });
        }
    }
    HttpResponse::Ok().content_type(ContentType::plaintext()).body(ben_map! {
        "complete" => ben_int!(result.complete as i64),
        "incomplete" => ben_int!(result.incomplete as i64),
        "interval" => ben_int!(interval as i64),
        "min interval" => ben_int!(min_interval as i64),
        "peers" => peers_list
    }.encode())
}

pub async fn http_service_scrape(request: HttpRequest, path: web::Path<String>, data: Data<Arc<HttpServiceData>>) -> HttpResponse
{
    let tracker = &data.torrent_tracker;
    if tracker.terminate.load(Ordering::Relaxed) {
        return HttpResponse::Ok().finish();
    }
    tracker.update_stats(StatsEvent::Requests, 1);

    let passkey = match path.into_inner().parse::<PassKey>() {
        Ok(passkey) => passkey,
        Err(_) => return http_service_failure(&data, "Malformed request - missing passkey"),
    };

    let query_map = match parse_query(Some(request.query_string().to_string())) {
        Ok(query_map) => query_map,
        Err(_) => return http_service_failure(&data, "Error parsing query"),
    };

    if let Err(response) = http_service_user(&data, &passkey) {
        return response;
    }

    if let Err(response) = http_resolve_ip(&request, &query_map, &data.real_ip, &data) {
        return response;
    }

    if !tracker.config.tracker_config.scrape_enabled {
        return http_service_failure(&data, "Unknown action");
    }

    tracker.update_stats(StatsEvent::ScrapesHandled, 1);

    let scrape = match tracker.validate_scrape(&query_map) {
        Ok(scrape) => scrape,
        Err(error) => return http_service_failure(&data, &error.message),
    };

    let files = tracker.handle_scrape(&scrape);
    let mut files_dict = ben_map!();
    let files_dict_mut = files_dict.dict_mut().unwrap();
    for (info_hash, (complete, downloaded, incomplete)) in files.iter() {
        files_dict_mut.insert(std::borrow::Cow::from(info_hash.0.to_vec()), ben_map! {
            "complete" => ben_int!(*complete as i64),
            "downloaded" => ben_int!(*downloaded as i64),
            "incomplete" => ben_int!(*incomplete as i64)
        });
    }
    HttpResponse::Ok().content_type(ContentType::plaintext()).body(ben_map! {
        "files" => files_dict
    }.encode())
}

pub async fn http_service_stats(_request: HttpRequest, data: Data<Arc<HttpServiceData>>) -> HttpResponse
{
    let tracker = &data.torrent_tracker;
    if tracker.terminate.load(Ordering::Relaxed) {
        return HttpResponse::Ok().finish();
    }
    tracker.update_stats(StatsEvent::Requests, 1);

    let stats = tracker.get_stats();
    let uptime = (Utc::now().timestamp() - stats.started) as f64;
    HttpResponse::Ok().content_type(ContentType::plaintext()).body(format!(
        "Uptime: {:.6}\nUsers: {}\nTorrents: {}\nPeers: {}\nThroughput: {} rpm\n",
        uptime,
        stats.users,
        stats.torrents,
        stats.seeds + stats.peers,
        stats.throughput,
    ))
}

pub async fn http_service_not_found(request: HttpRequest, data: Data<Arc<HttpServiceData>>) -> HttpResponse
{
    let tracker = &data.torrent_tracker;
    if tracker.terminate.load(Ordering::Relaxed) {
        return HttpResponse::Ok().finish();
    }
    tracker.update_stats(StatsEvent::Requests, 1);

    let first_segment = request.path().split('/').nth(1).unwrap_or("");
    if first_segment.len() == 32 {
        return http_service_failure(&data, "Unknown action");
    }
    http_service_failure(&data, "Malformed request - missing passkey")
}
